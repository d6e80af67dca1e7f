use std::{sync::Mutex, time::Duration};

use crate::traits::Clock;

/// Simulated clock for debug or tests. `delay` advances time instead of sleeping.
#[derive(Debug, Default)]
pub struct DummyClock {
    pub now_millis: Mutex<u32>,
    pub delays: Mutex<Vec<Duration>>,
}

impl DummyClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(millis: u32) -> Self {
        Self {
            now_millis: Mutex::new(millis),
            delays: Mutex::default(),
        }
    }

    pub fn advance(&self, duration: Duration) {
        let mut now = self.now_millis.lock().unwrap();
        *now = now.wrapping_add(duration.as_millis() as u32);
    }

    /// Total time spent in `delay`.
    pub fn total_delay(&self) -> Duration {
        self.delays.lock().unwrap().iter().sum()
    }
}

impl Clock for DummyClock {
    fn now_millis(&self) -> u32 {
        *self.now_millis.lock().unwrap()
    }

    fn delay(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
        self.advance(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_advances_time() {
        let clock = DummyClock::starting_at(1_000);
        clock.delay(Duration::from_millis(250));
        clock.delay(Duration::from_millis(50));
        assert_eq!(clock.now_millis(), 1_300);
        assert_eq!(clock.total_delay(), Duration::from_millis(300));
    }

    #[test]
    fn test_wraps_around() {
        let clock = DummyClock::starting_at(u32::MAX - 5);
        clock.advance(Duration::from_millis(10));
        assert_eq!(clock.now_millis(), 4);
    }
}
