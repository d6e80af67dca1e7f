use std::sync::Mutex;

use crate::{
    error::Error,
    traits::{InertialReading, InertialSensor},
};

#[derive(Debug, Default)]
pub struct DummyInertialSensor {
    pub reading: Mutex<InertialReading>,
}

impl DummyInertialSensor {
    pub fn new(reading: InertialReading) -> Self {
        Self {
            reading: Mutex::new(reading),
        }
    }

    /// Level and still, with a constant yaw rate (in rad/s).
    pub fn with_yaw_rate(yaw_rate: f32) -> Self {
        Self::new(InertialReading::new([0.0, 0.0, 9.81], [0.0, 0.0, yaw_rate]))
    }

    pub fn set_reading(&self, reading: InertialReading) {
        *self.reading.lock().unwrap() = reading;
    }
}

impl InertialSensor for DummyInertialSensor {
    fn read_inertial(&self) -> Result<InertialReading, Error> {
        Ok(*self.reading.lock().unwrap())
    }
}
