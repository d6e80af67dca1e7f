use std::{fmt, sync::Arc};

use gapscan_hal::{
    Barometer, Clock, DataRate, DistanceSensor, InertialSensor, RadioTransport, Servo,
    TransmitError,
};
use tracing::{info, warn};

use crate::error::CodecError;

/// The collaborators a transmitting node is wired to.
#[derive(Clone)]
pub struct SweepHardware {
    pub distance: Arc<dyn DistanceSensor>,
    pub inertial: Arc<dyn InertialSensor>,
    pub barometer: Arc<dyn Barometer>,
    pub servo: Arc<dyn Servo>,
    pub radio: Arc<dyn RadioTransport>,
    pub clock: Arc<dyn Clock>,
}

impl fmt::Debug for SweepHardware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SweepHardware").finish_non_exhaustive()
    }
}

/// What became of one outgoing packet.
#[derive(Clone, Debug, PartialEq)]
pub enum Transmission {
    Sent(DataRate),
    Failed(TransmitError),
    /// The packet could not be encoded, nothing was sent.
    NotEncoded(CodecError),
}

impl Transmission {
    /// Transmits `encoded` once and logs the outcome. Failures are not retried.
    pub fn send(radio: &dyn RadioTransport, encoded: Result<Vec<u8>, CodecError>) -> Self {
        let bytes = match encoded {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("failed to encode packet: {e}");
                return Self::NotEncoded(e);
            }
        };
        match radio.transmit(&bytes) {
            Ok(rate) => {
                info!(
                    "sent {} bytes at {:.0} bps",
                    bytes.len(),
                    rate.bits_per_second()
                );
                Self::Sent(rate)
            }
            Err(e) => {
                match e {
                    TransmitError::TooLong { .. } => warn!("packet dropped: {e}"),
                    TransmitError::Timeout => warn!("transmission timed out"),
                    TransmitError::Other(code) => warn!("transmission failed, code {code}"),
                }
                Self::Failed(e)
            }
        }
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }
}

#[cfg(test)]
mod tests {
    use gapscan_hal::DummyRadio;

    use super::*;

    #[test]
    fn test_send() {
        let radio = DummyRadio::with_max_packet_len(4);
        assert!(Transmission::send(&radio, Ok(vec![1, 2, 3])).is_sent());
        assert_eq!(
            Transmission::send(&radio, Ok(vec![0; 5])),
            Transmission::Failed(TransmitError::TooLong { len: 5, max: 4 })
        );
        radio.fail_next(TransmitError::Timeout);
        assert_eq!(
            Transmission::send(&radio, Ok(vec![1])),
            Transmission::Failed(TransmitError::Timeout)
        );
        assert_eq!(
            Transmission::send(&radio, Err(CodecError::CapacityTooLarge(70_000))),
            Transmission::NotEncoded(CodecError::CapacityTooLarge(70_000))
        );
        assert_eq!(radio.sent(), vec![vec![1, 2, 3]]);
    }
}
