use std::{collections::VecDeque, sync::Mutex};

use crate::{error::Error, traits::DistanceSensor};

/// Dummy DistanceSensor for debug or tests.
///
/// Scripted readings are returned first, in order. `None` stands for a read
/// the device did not acknowledge. Once the script is exhausted, `fallback`
/// is returned forever.
#[derive(Debug, Default)]
pub struct DummyDistanceSensor {
    pub script: Mutex<VecDeque<Option<i16>>>,
    pub fallback: Mutex<Option<i16>>,
}

impl DummyDistanceSensor {
    pub fn new(distance: i16) -> Self {
        Self {
            script: Mutex::default(),
            fallback: Mutex::new(Some(distance)),
        }
    }

    /// A sensor that never answers.
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn scripted(
        readings: impl IntoIterator<Item = Option<i16>>,
        fallback: Option<i16>,
    ) -> Self {
        Self {
            script: Mutex::new(readings.into_iter().collect()),
            fallback: Mutex::new(fallback),
        }
    }

    pub fn push(&self, reading: Option<i16>) {
        self.script.lock().unwrap().push_back(reading);
    }

    pub fn set_fallback(&self, reading: Option<i16>) {
        *self.fallback.lock().unwrap() = reading;
    }
}

impl DistanceSensor for DummyDistanceSensor {
    fn read_distance(&self) -> Result<i16, Error> {
        let reading = match self.script.lock().unwrap().pop_front() {
            Some(reading) => reading,
            None => *self.fallback.lock().unwrap(),
        };
        reading.ok_or_else(|| Error::sensor_unavailable("distance"))
    }
}
