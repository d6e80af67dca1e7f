use std::sync::Arc;

use gapscan_hal::{PacketSignal, RadioTransport, DEFAULT_MAX_PACKET_LEN};
use tracing::{debug, info, warn};

use crate::{buffer::SweepPacket, codec::PacketCodec};

/// Every n-th range/angle pair is printed by [`log_summary`].
const SUMMARY_STRIDE: usize = 5;

/// Receiving end of the sweep link.
///
/// The radio driver raises `signal` when a packet is waiting; each tick
/// consumes at most one notification.
pub struct SweepReceiver {
    radio: Arc<dyn RadioTransport>,
    signal: PacketSignal,
    buf: Vec<u8>,
    received: usize,
    dropped: usize,
}

impl std::fmt::Debug for SweepReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SweepReceiver")
            .field("received", &self.received)
            .field("dropped", &self.dropped)
            .finish_non_exhaustive()
    }
}

impl SweepReceiver {
    pub fn new(radio: Arc<dyn RadioTransport>, signal: PacketSignal) -> Self {
        Self::with_max_packet_len(radio, signal, DEFAULT_MAX_PACKET_LEN)
    }

    pub fn with_max_packet_len(
        radio: Arc<dyn RadioTransport>,
        signal: PacketSignal,
        max_packet_len: usize,
    ) -> Self {
        Self {
            radio,
            signal,
            buf: vec![0; max_packet_len],
            received: 0,
            dropped: 0,
        }
    }

    /// Puts the radio in receive mode.
    pub fn start(&self) -> Result<(), gapscan_hal::Error> {
        self.radio
            .start_receive()
            .map_err(|e| gapscan_hal::Error::initialization("radio", e.to_string()))?;
        info!("listening for sweeps");
        Ok(())
    }

    /// Returns the packet announced since the previous tick, if any.
    ///
    /// Packets that cannot be read or decoded are logged and dropped.
    pub fn tick(&mut self) -> Option<SweepPacket> {
        if !self.signal.take() {
            return None;
        }
        let len = match self.radio.read_data(&mut self.buf) {
            Ok(len) => len,
            Err(e) => {
                warn!("failed to read packet: {e}");
                self.dropped += 1;
                return None;
            }
        };
        match PacketCodec::decode_sweep(&self.buf[..len]) {
            Ok(packet) => {
                self.received += 1;
                debug!("received {len} bytes");
                Some(packet)
            }
            Err(e) => {
                warn!("dropping packet of {len} bytes: {e}");
                self.dropped += 1;
                None
            }
        }
    }

    /// Sweeps decoded so far.
    pub fn received(&self) -> usize {
        self.received
    }

    /// Notifications that did not yield a sweep.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// Prints a received sweep the way the receiving node's console does.
pub fn log_summary(packet: &SweepPacket) {
    info!(
        "device {} at {} ms: {:.1} degC, human {}, {} of {} samples valid",
        packet.device_id,
        packet.timestamp,
        packet.temperature,
        packet.human_detected,
        packet.buffer.valid_count(),
        packet.buffer.capacity()
    );
    for sample in packet
        .buffer
        .valid_samples()
        .iter()
        .step_by(SUMMARY_STRIDE)
    {
        info!("range {} cm at {} deg", sample.distance, sample.angle);
    }
}
