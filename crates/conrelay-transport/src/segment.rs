use std::sync::{Arc, Mutex, PoisonError};

use crate::frame;

/// Byte storage behind a [`Mailbox`](crate::Mailbox).
///
/// Access is exclusive by protocol: only the party that holds the gate token
/// touches the bytes.
pub trait Segment: Send {
    fn capacity(&self) -> usize;

    fn with_bytes<R>(&mut self, f: impl FnOnce(&mut [u8]) -> R) -> R;
}

/// Heap segment shared between threads of one process.
#[derive(Clone)]
pub struct LocalSegment {
    bytes: Arc<Mutex<Vec<u8>>>,
    capacity: usize,
}

impl LocalSegment {
    pub fn new(capacity: usize) -> Self {
        let mut bytes = vec![0u8; capacity];
        if capacity >= frame::SEGMENT_HEADER_LEN {
            frame::reset(&mut bytes);
        }
        Self {
            bytes: Arc::new(Mutex::new(bytes)),
            capacity,
        }
    }
}

impl Segment for LocalSegment {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn with_bytes<R>(&mut self, f: impl FnOnce(&mut [u8]) -> R) -> R {
        let mut bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut bytes)
    }
}
