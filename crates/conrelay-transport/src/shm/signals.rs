use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};

use conrelay_common::TransportError;

use super::futex;
use super::region::SharedRegion;
use crate::gate::{GateSignals, Signal};

const EMPTY: usize = 0;
const READY: usize = 1;
const GENERATION: usize = 2;
const CLOSED: usize = 3;

/// Size of a gate file: four `u32` words.
pub const GATE_LEN: usize = 4 * 4;

/// Initial contents of a gate file: `Empty` raised.
pub(crate) fn initial_gate() -> [u8; GATE_LEN] {
    let mut words = [0u8; GATE_LEN];
    words[EMPTY * 4..EMPTY * 4 + 4].copy_from_slice(&1u32.to_le_bytes());
    words
}

/// Gate flags stored in a mapped gate file.
///
/// Waiters sleep on the generation word, which every raise and close bumps.
pub struct SharedSignals {
    region: SharedRegion,
}

impl SharedSignals {
    pub fn open(path: &Path) -> Result<Self, TransportError> {
        let region = SharedRegion::open(path)?;
        if region.len() < GATE_LEN {
            return Err(TransportError::Map {
                path: path.to_path_buf(),
                reason: format!("gate file holds {} bytes, need {GATE_LEN}", region.len()),
            });
        }
        Ok(Self { region })
    }

    fn word(&self, index: usize) -> &AtomicU32 {
        debug_assert!(index < 4);
        // SAFETY: the mapping is page aligned and at least GATE_LEN bytes
        // long, and every access to these words goes through atomics.
        unsafe { &*self.region.as_ptr().cast::<AtomicU32>().add(index) }
    }

    fn flag(&self, signal: Signal) -> &AtomicU32 {
        match signal {
            Signal::Empty => self.word(EMPTY),
            Signal::Ready => self.word(READY),
        }
    }

    fn bump(&self) {
        let generation = self.word(GENERATION);
        generation.fetch_add(1, Ordering::AcqRel);
        futex::wake_all(generation);
    }
}

impl GateSignals for SharedSignals {
    fn raise(&self, signal: Signal) {
        self.flag(signal).store(1, Ordering::Release);
        self.bump();
    }

    fn take(&self, any_of: &[Signal]) -> Result<Signal, TransportError> {
        loop {
            let seen = self.word(GENERATION).load(Ordering::Acquire);
            for &signal in any_of {
                if self
                    .flag(signal)
                    .compare_exchange(1, 0, Ordering::AcqRel, Ordering::Acquire)
                    .is_ok()
                {
                    return Ok(signal);
                }
            }
            if self.is_closed() {
                return Err(TransportError::Closed);
            }
            futex::wait(self.word(GENERATION), seen);
        }
    }

    fn close(&self) {
        self.word(CLOSED).store(1, Ordering::Release);
        self.bump();
    }

    fn is_closed(&self) -> bool {
        self.word(CLOSED).load(Ordering::Acquire) != 0
    }
}
