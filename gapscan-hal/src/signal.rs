use flume::{Receiver, Sender, TrySendError};

/// Single-slot "packet available" notification.
///
/// The radio side calls [`raise`](Self::raise) when a packet arrives, the
/// receive loop calls [`take`](Self::take) once per tick. At most one signal is
/// pending; raising again before it is taken coalesces into the pending one.
/// Clones share the same slot.
#[derive(Debug, Clone)]
pub struct PacketSignal {
    tx: Sender<()>,
    rx: Receiver<()>,
}

impl PacketSignal {
    pub fn new() -> Self {
        let (tx, rx) = flume::bounded(1);
        Self { tx, rx }
    }

    /// Returns `false` if a signal was already pending.
    pub fn raise(&self) -> bool {
        match self.tx.try_send(()) {
            Ok(()) => true,
            Err(TrySendError::Full(())) => false,
            // Both ends live in `self`, so the channel cannot be disconnected.
            Err(TrySendError::Disconnected(())) => false,
        }
    }

    /// Consumes the pending signal, if any.
    pub fn take(&self) -> bool {
        self.rx.try_recv().is_ok()
    }

    pub fn is_pending(&self) -> bool {
        !self.rx.is_empty()
    }
}

impl Default for PacketSignal {
    fn default() -> Self {
        Self::new()
    }
}
