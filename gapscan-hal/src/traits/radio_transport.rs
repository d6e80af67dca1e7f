use auto_impl::auto_impl;

use crate::error::{Error, TransmitError};

/// Measured data rate (in bits per second) of a finished transmission.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DataRate(pub f32);

impl DataRate {
    pub fn bits_per_second(&self) -> f32 {
        self.0
    }
}

/// Long range packet radio.
#[auto_impl(Box, Arc)]
pub trait RadioTransport: Send + Sync {
    /// Sends one packet and blocks until it is out (or failed).
    fn transmit(&self, data: &[u8]) -> Result<DataRate, TransmitError>;
    /// Puts the radio in receive mode.
    fn start_receive(&self) -> Result<(), Error>;
    /// Copies the last received packet into `buf` and returns its length.
    ///
    /// Packets longer than `buf` are truncated.
    fn read_data(&self, buf: &mut [u8]) -> Result<usize, Error>;
}
