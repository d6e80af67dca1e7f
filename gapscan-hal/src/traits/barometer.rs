use auto_impl::auto_impl;

use crate::error::Error;

/// Barometric pressure sensor.
#[auto_impl(Box, Arc)]
pub trait Barometer: Send + Sync {
    /// Temperature in degrees Celsius.
    fn read_temperature(&self) -> Result<f32, Error>;
    /// Pressure in Pa.
    fn read_pressure(&self) -> Result<f32, Error>;
    /// Altitude in meters, relative to the given sea level pressure (in hPa).
    fn read_altitude(&self, sea_level_hpa: f32) -> Result<f32, Error>;
}
