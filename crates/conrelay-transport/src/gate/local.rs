use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use conrelay_common::TransportError;

use super::{GateSignals, Signal};

#[derive(Debug)]
struct Flags {
    empty: bool,
    ready: bool,
    closed: bool,
}

impl Flags {
    fn slot(&mut self, signal: Signal) -> &mut bool {
        match signal {
            Signal::Empty => &mut self.empty,
            Signal::Ready => &mut self.ready,
        }
    }
}

/// Gate signals for threads of one process.
#[derive(Debug)]
pub struct LocalSignals {
    flags: Mutex<Flags>,
    changed: Condvar,
}

impl LocalSignals {
    pub fn new() -> Self {
        Self {
            flags: Mutex::new(Flags {
                empty: true,
                ready: false,
                closed: false,
            }),
            changed: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Flags> {
        self.flags.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for LocalSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl GateSignals for LocalSignals {
    fn raise(&self, signal: Signal) {
        *self.lock().slot(signal) = true;
        self.changed.notify_all();
    }

    fn take(&self, any_of: &[Signal]) -> Result<Signal, TransportError> {
        let mut flags = self.lock();
        loop {
            for &signal in any_of {
                let slot = flags.slot(signal);
                if *slot {
                    *slot = false;
                    return Ok(signal);
                }
            }
            if flags.closed {
                return Err(TransportError::Closed);
            }
            flags = self
                .changed
                .wait(flags)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn close(&self) {
        self.lock().closed = true;
        self.changed.notify_all();
    }

    fn is_closed(&self) -> bool {
        self.lock().closed
    }
}
