use auto_impl::auto_impl;

use crate::error::Error;

#[auto_impl(Box, Arc)]
pub trait Servo: Send + Sync {
    /// Commands the horn to `degrees`. There is no acknowledgment; callers
    /// wait for the servo to settle themselves.
    fn write_angle(&self, degrees: i16) -> Result<(), Error>;
}
