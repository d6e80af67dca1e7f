use std::f32::consts::PI;

/// Gaps longer than this (in seconds) are not integrated.
const MAX_INTEGRATION_STEP_SEC: f32 = 1.0;

/// Integrates the yaw rate of the chassis so that servo angles can be
/// reported in the frame the chassis had when the estimator was reset.
#[derive(Debug, Default, Clone)]
pub struct AngleFusionEstimator {
    accumulated_deg: f32,
    last_update_millis: Option<u32>,
}

impl AngleFusionEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `gyro_rate_z` (in rad/s) over the time since the previous call.
    ///
    /// Must be called once per sample, in sample order. The first call only
    /// records the time. Steps of a second or more are skipped as stale.
    pub fn integrate(&mut self, gyro_rate_z: f32, now_millis: u32) {
        let last = self.last_update_millis.replace(now_millis);
        let Some(last) = last else {
            return;
        };
        let dt = now_millis.wrapping_sub(last) as f32 / 1000.0;
        if dt >= MAX_INTEGRATION_STEP_SEC || !gyro_rate_z.is_finite() {
            return;
        }
        self.accumulated_deg += gyro_rate_z * (180.0 / PI) * dt;
    }

    /// `servo_angle` minus the accumulated rotation, in `(-180, 180]`.
    pub fn relative_angle(&self, servo_angle: f32) -> f32 {
        normalize_degrees(servo_angle - self.accumulated_deg)
    }

    /// Rotation (in degrees) integrated since the last reset.
    pub fn accumulated_angle(&self) -> f32 {
        self.accumulated_deg
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Wraps `degrees` into `(-180, 180]`.
pub fn normalize_degrees(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return degrees;
    }
    let mut a = degrees % 360.0;
    while a > 180.0 {
        a -= 360.0;
    }
    while a <= -180.0 {
        a += 360.0;
    }
    a
}
