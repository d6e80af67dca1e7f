use auto_impl::auto_impl;

use crate::error::Error;

/// Time-of-flight distance sensor.
#[auto_impl(Box, Arc)]
pub trait DistanceSensor: Send + Sync {
    /// Distance in centimeters.
    ///
    /// Returns [`Error::SensorUnavailable`] when the device did not answer.
    fn read_distance(&self) -> Result<i16, Error>;
}
