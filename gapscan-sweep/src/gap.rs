/// Finer sampling angle proposed after a distance discontinuity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RetraceRequest {
    /// Degrees, in servo coordinates.
    pub angle: i16,
    pub correction_degrees: f32,
    pub distance_diff: i16,
}

/// Decides whether two consecutive distances straddle an edge (a gap or a
/// doorway) and where to look again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GapDetector {
    /// Distance jumps (in cm) up to this value are ordinary surface changes.
    pub min_passable_gap: i16,
    /// Corrections (in degrees) below this value are not worth a retrace.
    pub min_angle_change: i16,
}

impl GapDetector {
    pub fn new(min_passable_gap: i16, min_angle_change: i16) -> Self {
        Self {
            min_passable_gap,
            min_angle_change,
        }
    }

    /// Whether `current` jumped more than `min_passable_gap` from a usable
    /// baseline.
    pub fn is_discontinuity(&self, current: i16, last_valid: i16) -> bool {
        last_valid > 0
            && current > 0
            && (i32::from(current) - i32::from(last_valid)).abs() > i32::from(self.min_passable_gap)
    }

    /// Proposes a retrace angle, offset from the previous step angle by the
    /// correction.
    ///
    /// The correction is the arc-length over radius approximation
    /// `diff / current` converted to degrees, not a triangulation.
    pub fn evaluate(
        &self,
        current: i16,
        last_valid: i16,
        previous_step_angle: i16,
    ) -> Option<RetraceRequest> {
        if !self.is_discontinuity(current, last_valid) {
            return None;
        }
        let distance_diff = (i32::from(current) - i32::from(last_valid)).abs();
        let correction_degrees = (distance_diff as f32 / f32::from(current)).to_degrees();
        let offset = correction_degrees.round() as i32;
        if offset.abs() < i32::from(self.min_angle_change) {
            return None;
        }
        let angle = (i32::from(previous_step_angle) + offset)
            .clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16;
        Some(RetraceRequest {
            angle,
            correction_degrees,
            distance_diff: distance_diff.min(i32::from(i16::MAX)) as i16,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn test_triggers_on_large_jump() {
        let detector = GapDetector::new(20, 2);
        let request = detector.evaluate(130, 100, 40).unwrap();
        assert_eq!(request.distance_diff, 30);
        assert_approx_eq!(request.correction_degrees, 13.2, 0.05);
        assert_eq!(request.angle, 53);
    }

    #[test]
    fn test_no_baseline() {
        let detector = GapDetector::new(20, 2);
        for current in [-1, 0, 1, 50, 130, 1200, i16::MAX] {
            assert_eq!(detector.evaluate(current, 0, 10), None);
            assert_eq!(detector.evaluate(current, -1, 10), None);
        }
    }

    #[test]
    fn test_small_jump() {
        let detector = GapDetector::new(20, 2);
        assert_eq!(detector.evaluate(120, 100, 10), None);
        assert!(!detector.is_discontinuity(120, 100));
        assert!(detector.is_discontinuity(121, 100));
        assert!(detector.is_discontinuity(79, 100));
    }

    #[test]
    fn test_invalid_current() {
        let detector = GapDetector::new(20, 2);
        assert_eq!(detector.evaluate(-1, 100, 10), None);
        assert_eq!(detector.evaluate(0, 100, 10), None);
    }

    #[test]
    fn test_correction_too_small() {
        let detector = GapDetector::new(20, 2);
        // 25 / 3000 rad is about 0.48 degrees
        assert!(detector.is_discontinuity(3000, 2975));
        assert_eq!(detector.evaluate(3000, 2975, 10), None);
    }

    #[test]
    fn test_closer_object() {
        let detector = GapDetector::new(20, 2);
        // 100 -> 50: 50/50 rad
        let request = detector.evaluate(50, 100, 20).unwrap();
        assert_approx_eq!(request.correction_degrees, 57.29578, 1e-3);
        assert_eq!(request.angle, 77);
    }

    #[test]
    fn test_pure() {
        let detector = GapDetector::new(20, 2);
        let first = detector.evaluate(300, 120, 90);
        for _ in 0..10 {
            assert_eq!(detector.evaluate(300, 120, 90), first);
        }
    }
}
