use auto_impl::auto_impl;

use crate::error::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InertialReading {
    /// Linear acceleration (in m/s^2) along x, y and z.
    pub accel: [f32; 3],
    /// Angular rate (in rad/s) around x, y and z.
    pub gyro: [f32; 3],
}

impl InertialReading {
    pub fn new(accel: [f32; 3], gyro: [f32; 3]) -> Self {
        Self { accel, gyro }
    }

    /// Yaw rate (in rad/s).
    pub fn yaw_rate(&self) -> f32 {
        self.gyro[2]
    }
}

#[auto_impl(Box, Arc)]
pub trait InertialSensor: Send + Sync {
    fn read_inertial(&self) -> Result<InertialReading, Error>;
}
