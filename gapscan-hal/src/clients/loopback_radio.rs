use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use tracing::debug;

use super::{dummy_radio::RADIO_NO_PACKET, DEFAULT_BITS_PER_SECOND, DEFAULT_MAX_PACKET_LEN};
use crate::{
    error::{Error, TransmitError},
    signal::PacketSignal,
    traits::{DataRate, RadioTransport},
};

#[derive(Debug, Default)]
struct Mailbox {
    /// Like the radio's FIFO, a new packet overwrites an unread one.
    packet: Mutex<Option<Vec<u8>>>,
    listening: AtomicBool,
    signal: PacketSignal,
}

/// One end of an in-process radio link.
///
/// Packets transmitted on one end arrive at the other end if it is in receive
/// mode, raising that end's [`PacketSignal`].
#[derive(Debug)]
pub struct LoopbackRadio {
    inbox: Arc<Mailbox>,
    peer: Arc<Mailbox>,
    max_packet_len: usize,
}

impl LoopbackRadio {
    pub fn pair() -> (Self, Self) {
        Self::pair_with_max_packet_len(DEFAULT_MAX_PACKET_LEN)
    }

    pub fn pair_with_max_packet_len(max_packet_len: usize) -> (Self, Self) {
        let a = Arc::new(Mailbox::default());
        let b = Arc::new(Mailbox::default());
        (
            Self {
                inbox: a.clone(),
                peer: b.clone(),
                max_packet_len,
            },
            Self {
                inbox: b,
                peer: a,
                max_packet_len,
            },
        )
    }

    /// Signal raised when a packet arrives at this end.
    pub fn signal(&self) -> PacketSignal {
        self.inbox.signal.clone()
    }
}

impl RadioTransport for LoopbackRadio {
    fn transmit(&self, data: &[u8]) -> Result<DataRate, TransmitError> {
        if data.len() > self.max_packet_len {
            return Err(TransmitError::TooLong {
                len: data.len(),
                max: self.max_packet_len,
            });
        }
        if self.peer.listening.load(Ordering::Acquire) {
            *self.peer.packet.lock().unwrap() = Some(data.to_vec());
            self.peer.signal.raise();
        } else {
            debug!("peer is not listening, {} bytes lost", data.len());
        }
        Ok(DataRate(DEFAULT_BITS_PER_SECOND))
    }

    fn start_receive(&self) -> Result<(), Error> {
        self.inbox.listening.store(true, Ordering::Release);
        Ok(())
    }

    fn read_data(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let packet = self.inbox.packet.lock().unwrap().take().ok_or(Error::Radio {
            code: RADIO_NO_PACKET,
        })?;
        let len = packet.len().min(buf.len());
        buf[..len].copy_from_slice(&packet[..len]);
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_needs_listener() {
        let (tx, rx) = LoopbackRadio::pair();
        let signal = rx.signal();

        tx.transmit(&[1, 2, 3]).unwrap();
        assert!(!signal.take());

        rx.start_receive().unwrap();
        tx.transmit(&[4, 5]).unwrap();
        assert!(signal.take());
        let mut buf = [0u8; 8];
        assert_eq!(rx.read_data(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], &[4, 5]);
        assert!(rx.read_data(&mut buf).is_err());
    }

    #[test]
    fn test_newer_packet_overwrites() {
        let (tx, rx) = LoopbackRadio::pair();
        rx.start_receive().unwrap();
        tx.transmit(&[1]).unwrap();
        tx.transmit(&[2]).unwrap();

        let signal = rx.signal();
        assert!(signal.take());
        assert!(!signal.take());
        let mut buf = [0u8; 4];
        assert_eq!(rx.read_data(&mut buf).unwrap(), 1);
        assert_eq!(buf[0], 2);
    }

    #[test]
    fn test_too_long() {
        let (tx, _rx) = LoopbackRadio::pair_with_max_packet_len(2);
        assert_eq!(
            tx.transmit(&[0; 3]),
            Err(TransmitError::TooLong { len: 3, max: 2 })
        );
    }
}
