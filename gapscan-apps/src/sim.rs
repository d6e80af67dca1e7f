use std::sync::{Arc, Mutex};

use gapscan_hal::{DistanceSensor, DummyServo, Error};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::RoomConfig;

/// Distance sensor mounted on a [`DummyServo`], looking at a [`RoomConfig`].
#[derive(Debug)]
pub struct SimulatedRangeFinder {
    servo: Arc<DummyServo>,
    room: RoomConfig,
    rng: Mutex<StdRng>,
}

impl SimulatedRangeFinder {
    pub fn new(servo: Arc<DummyServo>, room: RoomConfig, seed: u64) -> Self {
        Self {
            servo,
            room,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl DistanceSensor for SimulatedRangeFinder {
    fn read_distance(&self) -> Result<i16, Error> {
        let mut rng = self.rng.lock().unwrap();
        if self.room.dropout_probability > 0.0 && rng.gen_bool(self.room.dropout_probability) {
            return Err(Error::sensor_unavailable("simulated range finder"));
        }
        let distance = self.room.distance_at(self.servo.current_angle());
        let noise = if self.room.noise > 0 {
            rng.gen_range(-self.room.noise..=self.room.noise)
        } else {
            0
        };
        Ok(distance.saturating_add(noise).max(1))
    }
}

#[cfg(test)]
mod tests {
    use gapscan_hal::Servo;

    use super::*;

    #[test]
    fn test_follows_servo() {
        let servo = Arc::new(DummyServo::new());
        let room = RoomConfig {
            noise: 0,
            ..Default::default()
        };
        let sensor = SimulatedRangeFinder::new(servo.clone(), room, 0);
        assert_eq!(sensor.read_distance().unwrap(), 150);
        servo.write_angle(70).unwrap();
        assert_eq!(sensor.read_distance().unwrap(), 320);
    }

    #[test]
    fn test_noise_is_bounded_and_seeded() {
        let servo = Arc::new(DummyServo::new());
        let a = SimulatedRangeFinder::new(servo.clone(), RoomConfig::default(), 3);
        let b = SimulatedRangeFinder::new(servo, RoomConfig::default(), 3);
        for _ in 0..100 {
            let d = a.read_distance().unwrap();
            assert!((148..=152).contains(&d));
            assert_eq!(d, b.read_distance().unwrap());
        }
    }

    #[test]
    fn test_dropout() {
        let room = RoomConfig {
            dropout_probability: 1.0,
            ..Default::default()
        };
        let sensor = SimulatedRangeFinder::new(Arc::new(DummyServo::new()), room, 0);
        assert!(matches!(
            sensor.read_distance(),
            Err(Error::SensorUnavailable { .. })
        ));
    }
}
