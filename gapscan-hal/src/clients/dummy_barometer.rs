use std::sync::Mutex;

use crate::{error::Error, traits::Barometer};

#[derive(Debug)]
pub struct DummyBarometer {
    pub temperature: Mutex<f32>,
    /// In Pa.
    pub pressure: Mutex<f32>,
}

impl DummyBarometer {
    pub fn new(temperature: f32, pressure: f32) -> Self {
        Self {
            temperature: Mutex::new(temperature),
            pressure: Mutex::new(pressure),
        }
    }

    pub fn set_temperature(&self, temperature: f32) {
        *self.temperature.lock().unwrap() = temperature;
    }
}

impl Default for DummyBarometer {
    fn default() -> Self {
        Self::new(21.5, 101_325.0)
    }
}

impl Barometer for DummyBarometer {
    fn read_temperature(&self) -> Result<f32, Error> {
        Ok(*self.temperature.lock().unwrap())
    }

    fn read_pressure(&self) -> Result<f32, Error> {
        Ok(*self.pressure.lock().unwrap())
    }

    fn read_altitude(&self, sea_level_hpa: f32) -> Result<f32, Error> {
        let hpa = *self.pressure.lock().unwrap() / 100.0;
        Ok(44330.0 * (1.0 - (hpa / sea_level_hpa).powf(0.1903)))
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn test_altitude() {
        let barometer = DummyBarometer::default();
        assert_approx_eq!(barometer.read_altitude(1013.25).unwrap(), 0.0, 1e-3);

        *barometer.pressure.lock().unwrap() = 89_875.0;
        let altitude = barometer.read_altitude(1013.25).unwrap();
        assert!((990.0..1010.0).contains(&altitude), "{altitude}");
    }
}
