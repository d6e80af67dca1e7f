use std::time::Duration;

use auto_impl::auto_impl;

/// Source of time and the only way to block.
#[auto_impl(Box, Arc)]
pub trait Clock: Send + Sync {
    /// Milliseconds since boot. Wraps around like a microcontroller tick counter.
    fn now_millis(&self) -> u32;
    fn delay(&self, duration: Duration);
}
