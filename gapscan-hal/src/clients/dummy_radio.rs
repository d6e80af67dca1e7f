use std::{collections::VecDeque, sync::Mutex};

use super::{DEFAULT_BITS_PER_SECOND, DEFAULT_MAX_PACKET_LEN};
use crate::{
    error::{Error, TransmitError},
    traits::{DataRate, RadioTransport},
};

/// Code returned by `read_data` when nothing was received.
pub const RADIO_NO_PACKET: i16 = -1;

/// Dummy RadioTransport for debug or tests.
///
/// Sent packets are recorded. Scripted failures are returned by the next
/// transmissions, in order. `incoming` is what `read_data` hands out.
#[derive(Debug)]
pub struct DummyRadio {
    pub max_packet_len: usize,
    pub sent: Mutex<Vec<Vec<u8>>>,
    pub failures: Mutex<VecDeque<TransmitError>>,
    pub incoming: Mutex<VecDeque<Vec<u8>>>,
    pub receiving: Mutex<bool>,
}

impl DummyRadio {
    pub fn new() -> Self {
        Self::with_max_packet_len(DEFAULT_MAX_PACKET_LEN)
    }

    pub fn with_max_packet_len(max_packet_len: usize) -> Self {
        Self {
            max_packet_len,
            sent: Mutex::default(),
            failures: Mutex::default(),
            incoming: Mutex::default(),
            receiving: Mutex::new(false),
        }
    }

    pub fn fail_next(&self, error: TransmitError) {
        self.failures.lock().unwrap().push_back(error);
    }

    pub fn push_incoming(&self, packet: Vec<u8>) {
        self.incoming.lock().unwrap().push_back(packet);
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }

    pub fn is_receiving(&self) -> bool {
        *self.receiving.lock().unwrap()
    }
}

impl Default for DummyRadio {
    fn default() -> Self {
        Self::new()
    }
}

impl RadioTransport for DummyRadio {
    fn transmit(&self, data: &[u8]) -> Result<DataRate, TransmitError> {
        if data.len() > self.max_packet_len {
            return Err(TransmitError::TooLong {
                len: data.len(),
                max: self.max_packet_len,
            });
        }
        if let Some(error) = self.failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        self.sent.lock().unwrap().push(data.to_vec());
        Ok(DataRate(DEFAULT_BITS_PER_SECOND))
    }

    fn start_receive(&self) -> Result<(), Error> {
        *self.receiving.lock().unwrap() = true;
        Ok(())
    }

    fn read_data(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let packet = self
            .incoming
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(Error::Radio {
                code: RADIO_NO_PACKET,
            })?;
        let len = packet.len().min(buf.len());
        buf[..len].copy_from_slice(&packet[..len]);
        Ok(len)
    }
}
