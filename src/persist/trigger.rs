//! Write trigger
//!
//! A binary, auto-clearing wake-up signal between mutators and the
//! background writer, built on a capacity-1 crossbeam channel.

use std::time::Duration;

use crossbeam::channel::{bounded, Receiver, Sender, TrySendError};

/// Sending half: mark the store dirty and wake the writer
///
/// The channel holds at most one pending wake-up. Signalling while one is
/// already pending is a no-op, so any burst of signals between two writer
/// wake-ups collapses into a single write cycle. Cloning hands out another
/// mutator handle; the pending-wake slot stays shared.
#[derive(Clone, Debug)]
pub struct WriteTrigger {
    tx: Sender<()>,
}

/// Receiving half: owned by exactly one writer
pub struct WriteToken {
    rx: Receiver<()>,
}

impl WriteTrigger {
    /// Create a connected trigger/token pair
    pub fn new() -> (Self, WriteToken) {
        let (tx, rx) = bounded(1);
        (Self { tx }, WriteToken { rx })
    }

    /// Mark the store dirty, waking the writer if it is idle
    ///
    /// Never blocks. A full channel means a wake-up is already pending and
    /// the send is dropped (coalescing). A disconnected channel means the
    /// writer is gone and there is nothing left to wake.
    pub fn signal(&self) {
        match self.tx.try_send(()) {
            Ok(()) | Err(TrySendError::Full(())) | Err(TrySendError::Disconnected(())) => {}
        }
    }
}

impl WriteToken {
    /// Block until a signal has occurred since the last call
    ///
    /// Returns `false` once every trigger handle has been dropped, which is
    /// the writer's shutdown condition.
    pub fn wait(&self) -> bool {
        self.rx.recv().is_ok()
    }

    /// Bounded variant of [`wait`](Self::wait), for tests and shutdown paths
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        self.rx.recv_timeout(timeout).is_ok()
    }
}
