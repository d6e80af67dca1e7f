use std::time::{Duration, Instant};

use crate::traits::Clock;

/// Wall clock that really sleeps.
#[derive(Debug, Clone)]
pub struct SystemClock {
    boot: Instant,
}

impl SystemClock {
    /// Creates a new `SystemClock` starting at zero.
    pub fn new() -> Self {
        Self {
            boot: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u32 {
        // Truncation wraps the counter every ~49 days.
        self.boot.elapsed().as_millis() as u32
    }

    fn delay(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
