use conrelay_common::TransportError;

use crate::frame::{self, WriteOutcome};
use crate::message::Message;
use crate::segment::Segment;

/// Framed view of one direction's segment.
pub struct Mailbox<S> {
    segment: S,
}

impl<S: Segment> Mailbox<S> {
    pub fn new(segment: S) -> Self {
        Self { segment }
    }

    pub fn capacity(&self) -> usize {
        self.segment.capacity()
    }

    pub fn bytes_in_use(&mut self) -> usize {
        self.segment.with_bytes(|buf| frame::bytes_in_use(buf))
    }

    pub fn reset(&mut self) {
        self.segment.with_bytes(frame::reset);
    }

    pub fn try_write(&mut self, message: &Message) -> WriteOutcome {
        self.segment.with_bytes(|buf| {
            frame::try_write(buf, message.kind, message.x, message.y, &message.text)
        })
    }

    pub fn read_all(&mut self) -> Result<Vec<Message>, TransportError> {
        self.segment.with_bytes(frame::read_all)
    }
}
