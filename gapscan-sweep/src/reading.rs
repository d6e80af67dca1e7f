use gapscan_hal::{InertialReading, RadioTransport};
use tracing::{debug, warn};

use crate::{
    codec::PacketCodec,
    hardware::{SweepHardware, Transmission},
    records::SensorReading,
    sample::INVALID_DISTANCE,
};

/// Reads every sensor once. Failed reads are logged and reported as
/// [`INVALID_DISTANCE`] or zero.
pub fn read_instant(hardware: &SweepHardware, sea_level_hpa: f32) -> SensorReading {
    let distance = hardware.distance.read_distance().unwrap_or_else(|e| {
        warn!("failed to read distance: {e}");
        INVALID_DISTANCE
    });
    let inertial = hardware.inertial.read_inertial().unwrap_or_else(|e| {
        warn!("failed to read inertial sensor: {e}");
        InertialReading::default()
    });
    let barometer = &hardware.barometer;
    let or_zero = |name: &str, value: Result<f32, gapscan_hal::Error>| {
        value.unwrap_or_else(|e| {
            warn!("failed to read {name}: {e}");
            0.0
        })
    };
    SensorReading {
        distance,
        temperature: or_zero("temperature", barometer.read_temperature()),
        pressure: or_zero("pressure", barometer.read_pressure()),
        altitude: or_zero("altitude", barometer.read_altitude(sea_level_hpa)),
        acceleration_x: inertial.accel[0],
        acceleration_y: inertial.accel[1],
        acceleration_z: inertial.accel[2],
        rotation_x: inertial.gyro[0],
        rotation_y: inertial.gyro[1],
        rotation_z: inertial.gyro[2],
    }
}

/// Sends single readings as JSON, one packet each.
#[derive(Debug)]
pub struct ReadingReporter {
    hardware: SweepHardware,
    sea_level_hpa: f32,
}

impl ReadingReporter {
    pub fn new(hardware: SweepHardware, sea_level_hpa: f32) -> Self {
        Self {
            hardware,
            sea_level_hpa,
        }
    }

    pub fn report(&self) -> (SensorReading, Transmission) {
        let reading = read_instant(&self.hardware, self.sea_level_hpa);
        debug!("reading {reading:?}");
        let radio: &dyn RadioTransport = &*self.hardware.radio;
        let transmission = Transmission::send(radio, PacketCodec::encode_json(&reading));
        (reading, transmission)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_approx_eq::assert_approx_eq;
    use gapscan_hal::{
        DummyBarometer, DummyClock, DummyDistanceSensor, DummyInertialSensor, DummyRadio,
        DummyServo, TransmitError,
    };

    use super::*;

    fn hardware(distance: DummyDistanceSensor, radio: Arc<DummyRadio>) -> SweepHardware {
        SweepHardware {
            distance: Arc::new(distance),
            inertial: Arc::new(DummyInertialSensor::new(InertialReading::new(
                [0.0, 0.0, 9.8],
                [0.0, 0.0, 0.5],
            ))),
            barometer: Arc::new(DummyBarometer::new(23.0, 101_325.0)),
            servo: Arc::new(DummyServo::new()),
            radio,
            clock: Arc::new(DummyClock::new()),
        }
    }

    #[test]
    fn test_read_instant() {
        let hw = hardware(DummyDistanceSensor::unavailable(), Arc::new(DummyRadio::new()));
        let reading = read_instant(&hw, 1013.25);
        assert_eq!(reading.distance, INVALID_DISTANCE);
        assert_approx_eq!(reading.temperature, 23.0);
        assert_approx_eq!(reading.altitude, 0.0, 0.1);
        assert_approx_eq!(reading.acceleration_z, 9.8);
        assert_approx_eq!(reading.rotation_z, 0.5);
    }

    #[test]
    fn test_report() {
        let radio = Arc::new(DummyRadio::new());
        let reporter = ReadingReporter::new(
            hardware(DummyDistanceSensor::new(321), radio.clone()),
            1013.25,
        );
        let (reading, transmission) = reporter.report();
        assert!(transmission.is_sent());
        let sent: SensorReading = PacketCodec::decode_json(&radio.sent()[0]).unwrap();
        assert_eq!(sent, reading);
        assert_eq!(sent.distance, 321);

        radio.fail_next(TransmitError::Other(-7));
        let (_, transmission) = reporter.report();
        assert_eq!(
            transmission,
            Transmission::Failed(TransmitError::Other(-7))
        );
        assert_eq!(radio.sent().len(), 1);
    }
}
