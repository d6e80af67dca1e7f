//! Wraps gapscan collaborators so that every call is recorded as a `trace!`
//! event, and reads those events back from a JSON log.
//!
//! ```
//! use gapscan_hal::{DummyServo, Servo};
//! use gapscan_tracing::Tracing;
//!
//! let servo = Tracing::new(DummyServo::new());
//! servo.write_angle(90).unwrap();
//! assert_eq!(servo.get_ref().current_angle(), 90);
//! ```

pub mod de;

use std::time::Duration;

use gapscan_hal::{DataRate, Error, InertialReading, TransmitError};
use tracing::trace;

#[derive(Debug)]
pub struct Tracing<T>(T);

impl<T> Tracing<T> {
    pub fn new(v: T) -> Self {
        Self(v)
    }

    pub fn get_ref(&self) -> &T {
        &self.0
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Tracing<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: gapscan_hal::DistanceSensor> gapscan_hal::DistanceSensor for Tracing<T> {
    fn read_distance(&self) -> Result<i16, Error> {
        let distance = self.0.read_distance()?;
        trace!(method = "gapscan_hal::DistanceSensor::read_distance", distance);
        Ok(distance)
    }
}

impl<T: gapscan_hal::InertialSensor> gapscan_hal::InertialSensor for Tracing<T> {
    fn read_inertial(&self) -> Result<InertialReading, Error> {
        let reading = self.0.read_inertial()?;
        trace!(
            method = "gapscan_hal::InertialSensor::read_inertial",
            accel_x = reading.accel[0],
            accel_y = reading.accel[1],
            accel_z = reading.accel[2],
            gyro_x = reading.gyro[0],
            gyro_y = reading.gyro[1],
            gyro_z = reading.gyro[2]
        );
        Ok(reading)
    }
}

impl<T: gapscan_hal::Barometer> gapscan_hal::Barometer for Tracing<T> {
    fn read_temperature(&self) -> Result<f32, Error> {
        let temperature = self.0.read_temperature()?;
        trace!(
            method = "gapscan_hal::Barometer::read_temperature",
            temperature
        );
        Ok(temperature)
    }

    fn read_pressure(&self) -> Result<f32, Error> {
        let pressure = self.0.read_pressure()?;
        trace!(method = "gapscan_hal::Barometer::read_pressure", pressure);
        Ok(pressure)
    }

    fn read_altitude(&self, sea_level_hpa: f32) -> Result<f32, Error> {
        let altitude = self.0.read_altitude(sea_level_hpa)?;
        trace!(
            method = "gapscan_hal::Barometer::read_altitude",
            sea_level_hpa,
            altitude
        );
        Ok(altitude)
    }
}

impl<T: gapscan_hal::Servo> gapscan_hal::Servo for Tracing<T> {
    fn write_angle(&self, degrees: i16) -> Result<(), Error> {
        trace!(method = "gapscan_hal::Servo::write_angle", degrees);
        self.0.write_angle(degrees)
    }
}

impl<T: gapscan_hal::RadioTransport> gapscan_hal::RadioTransport for Tracing<T> {
    fn transmit(&self, data: &[u8]) -> Result<DataRate, TransmitError> {
        let result = self.0.transmit(data);
        trace!(
            method = "gapscan_hal::RadioTransport::transmit",
            len = data.len(),
            ok = result.is_ok()
        );
        result
    }

    fn start_receive(&self) -> Result<(), Error> {
        trace!(method = "gapscan_hal::RadioTransport::start_receive");
        self.0.start_receive()
    }

    fn read_data(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let len = self.0.read_data(buf)?;
        trace!(method = "gapscan_hal::RadioTransport::read_data", len);
        Ok(len)
    }
}

impl<T: gapscan_hal::Clock> gapscan_hal::Clock for Tracing<T> {
    fn now_millis(&self) -> u32 {
        self.0.now_millis()
    }

    fn delay(&self, duration: Duration) {
        trace!(
            method = "gapscan_hal::Clock::delay",
            duration_millis = duration.as_millis() as u64
        );
        self.0.delay(duration)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_approx_eq::assert_approx_eq;
    use gapscan_hal::*;

    use super::*;

    #[test]
    fn test_delegates() {
        let distance = Tracing::new(DummyDistanceSensor::scripted([Some(7)], None));
        assert_eq!(distance.read_distance().unwrap(), 7);
        assert!(distance.read_distance().is_err());

        let barometer = Tracing::from(DummyBarometer::new(18.0, 90_000.0));
        assert_approx_eq!(barometer.read_temperature().unwrap(), 18.0);
        assert_approx_eq!(barometer.read_pressure().unwrap(), 90_000.0);
        assert!(barometer.read_altitude(1013.25).unwrap() > 900.0);

        let clock = Tracing::new(DummyClock::new());
        clock.delay(Duration::from_millis(30));
        assert_eq!(clock.now_millis(), 30);
        assert_eq!(clock.into_inner().total_delay(), Duration::from_millis(30));
    }

    #[test]
    fn test_radio_errors_pass_through() {
        let radio = Tracing::new(DummyRadio::with_max_packet_len(1));
        assert_eq!(
            radio.transmit(&[1, 2]),
            Err(TransmitError::TooLong { len: 2, max: 1 })
        );
        radio.start_receive().unwrap();
        assert!(radio.get_ref().is_receiving());
        let mut buf = [0u8; 4];
        assert!(radio.read_data(&mut buf).is_err());
    }

    #[test]
    fn test_as_trait_object() {
        let inertial: Arc<dyn InertialSensor> =
            Arc::new(Tracing::new(DummyInertialSensor::with_yaw_rate(0.3)));
        assert_approx_eq!(inertial.read_inertial().unwrap().yaw_rate(), 0.3);
        let mut servo = Tracing::new(DummyServo::new());
        servo.write_angle(45).unwrap();
        servo.get_mut().write_angle(50).unwrap();
        assert_eq!(servo.get_ref().history(), vec![45, 50]);
    }
}
