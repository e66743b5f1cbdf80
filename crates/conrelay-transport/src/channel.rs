//! Producer and consumer endpoints of one direction.

use conrelay_common::TransportError;
use tracing::{debug, warn};

use crate::frame::WriteOutcome;
use crate::gate::{SyncGate, Turn};
use crate::mailbox::Mailbox;
use crate::message::Message;
use crate::segment::{LocalSegment, Segment};

/// Writing end: owns the segment only between winning a turn and publishing.
pub struct Producer<S> {
    mailbox: Mailbox<S>,
    gate: SyncGate,
}

impl<S: Segment> Producer<S> {
    pub fn new(mailbox: Mailbox<S>, gate: SyncGate) -> Self {
        Self { mailbox, gate }
    }

    pub fn gate(&self) -> &SyncGate {
        &self.gate
    }

    pub fn capacity(&self) -> usize {
        self.mailbox.capacity()
    }

    pub fn send(&mut self, message: &Message) -> Result<usize, TransportError> {
        self.send_batch(std::slice::from_ref(message))
    }

    /// Write `messages` in order and publish them.
    ///
    /// When the segment fills up mid-batch the part written so far is
    /// published, and writing continues in the drained segment once the
    /// consumer hands it back. Returns how many messages had to be truncated.
    pub fn send_batch(&mut self, messages: &[Message]) -> Result<usize, TransportError> {
        if messages.is_empty() {
            return Ok(0);
        }
        if self.gate.acquire_producer_turn()? == Turn::Fresh {
            self.mailbox.reset();
        }

        let mut truncated = 0;
        for message in messages {
            let outcome = match self.mailbox.try_write(message) {
                WriteOutcome::Full => {
                    debug!(
                        capacity = self.mailbox.capacity(),
                        "segment full, flushing mid-batch"
                    );
                    self.gate.publish();
                    self.gate.await_empty()?;
                    self.mailbox.reset();
                    self.mailbox.try_write(message)
                }
                written => written,
            };
            match outcome {
                WriteOutcome::Written { truncated: true, .. } => {
                    warn!(
                        declared = message.text.len(),
                        capacity = self.mailbox.capacity(),
                        "message truncated to fit the segment"
                    );
                    truncated += 1;
                }
                WriteOutcome::Written { .. } => {}
                WriteOutcome::Full => {
                    // A drained segment always takes at least a truncated record.
                    return Err(TransportError::Corrupt(
                        "record does not fit an empty segment".into(),
                    ));
                }
            }
        }

        self.gate.publish();
        Ok(truncated)
    }
}

/// Reading end.
pub struct Consumer<S> {
    mailbox: Mailbox<S>,
    gate: SyncGate,
}

impl<S: Segment> Consumer<S> {
    pub fn new(mailbox: Mailbox<S>, gate: SyncGate) -> Self {
        Self { mailbox, gate }
    }

    pub fn gate(&self) -> &SyncGate {
        &self.gate
    }

    /// Block until a batch is published, drain it and hand the segment back.
    ///
    /// A corrupt batch is still released before the error is returned, so
    /// the producer is never stuck behind it.
    pub fn recv_batch(&mut self) -> Result<Vec<Message>, TransportError> {
        self.gate.await_ready()?;
        let batch = self.mailbox.read_all();
        self.gate.release();
        batch
    }
}

/// Both ends of one in-process direction.
pub fn local_channel(capacity: usize) -> (Producer<LocalSegment>, Consumer<LocalSegment>) {
    let segment = LocalSegment::new(capacity);
    let gate = SyncGate::local();
    (
        Producer::new(Mailbox::new(segment.clone()), gate.clone()),
        Consumer::new(Mailbox::new(segment), gate),
    )
}
