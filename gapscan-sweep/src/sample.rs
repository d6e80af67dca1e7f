/// Distance reported when the sensor gave no valid echo.
pub const INVALID_DISTANCE: i16 = -1;

/// One point of a sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SweepSample {
    /// Degrees, in the chassis frame at sweep start.
    pub angle: i16,
    /// Centimeters, or [`INVALID_DISTANCE`].
    pub distance: i16,
    /// Meters.
    pub altitude: f32,
    pub accel: [f32; 3],
    pub gyro: [f32; 3],
    /// `false` for unresolved discontinuities, invalid readings, and padding.
    pub is_passable: bool,
}

impl SweepSample {
    /// Filler for the slots a sweep did not use.
    pub fn sentinel() -> Self {
        Self {
            distance: INVALID_DISTANCE,
            ..Default::default()
        }
    }

    pub fn has_valid_distance(&self) -> bool {
        self.distance != INVALID_DISTANCE
    }
}
