//! Depth-1 handoff between a producer and a consumer.
//!
//! Two flags per direction, `Empty` and `Ready`, form a single token: at any
//! time exactly one of them is raised or one party holds the segment. A new
//! gate starts with `Empty` raised.

mod local;

pub use local::LocalSignals;

use std::sync::Arc;

use conrelay_common::TransportError;
use tracing::trace;

/// The two flags of a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The consumer has drained the segment; the producer may start over.
    Empty,
    /// A batch is waiting for the consumer.
    Ready,
}

/// Storage for the two flags plus a close marker.
///
/// Waits are unbounded. Closing the signals is the only way to break a wait:
/// a flag that is still raised is handed out after a close, but a wait that
/// finds none of its flags raised fails with `TransportError::Closed`.
pub trait GateSignals: Send + Sync {
    fn raise(&self, signal: Signal);

    /// Block until one of `any_of` is raised, lower it and return it.
    /// Earlier entries win when several are raised.
    fn take(&self, any_of: &[Signal]) -> Result<Signal, TransportError>;

    fn close(&self);

    fn is_closed(&self) -> bool;
}

/// How the producer came to own the segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// The consumer drained the previous batch.
    Fresh,
    /// The producer took its own unconsumed batch back and may append to it.
    Append,
}

/// Role-level operations over a set of [`GateSignals`].
#[derive(Clone)]
pub struct SyncGate {
    signals: Arc<dyn GateSignals>,
}

impl SyncGate {
    pub fn new(signals: Arc<dyn GateSignals>) -> Self {
        Self { signals }
    }

    /// In-process gate.
    pub fn local() -> Self {
        Self::new(Arc::new(LocalSignals::new()))
    }

    // -- producer -----------------------------------------------------------

    /// Wait until the producer owns the segment.
    pub fn acquire_producer_turn(&self) -> Result<Turn, TransportError> {
        let turn = match self.signals.take(&[Signal::Empty, Signal::Ready])? {
            Signal::Empty => Turn::Fresh,
            Signal::Ready => Turn::Append,
        };
        trace!(?turn, "producer turn acquired");
        Ok(turn)
    }

    /// Wait until the consumer has drained the published batch.
    pub fn await_empty(&self) -> Result<(), TransportError> {
        self.signals.take(&[Signal::Empty]).map(|_| ())
    }

    /// Hand the segment to the consumer.
    pub fn publish(&self) {
        self.signals.raise(Signal::Ready);
    }

    // -- consumer -----------------------------------------------------------

    pub fn await_ready(&self) -> Result<(), TransportError> {
        self.signals.take(&[Signal::Ready]).map(|_| ())
    }

    /// Hand the drained segment back to the producer.
    pub fn release(&self) {
        self.signals.raise(Signal::Empty);
    }

    // -- lifecycle ----------------------------------------------------------

    pub fn close(&self) {
        self.signals.close();
    }

    pub fn is_closed(&self) -> bool {
        self.signals.is_closed()
    }
}

#[cfg(test)]
mod tests;
