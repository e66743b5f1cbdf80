//! One-direction batch transport between the supervisor and remote roles.
//!
//! A fixed-capacity [`Mailbox`] carries framed [`Message`] records; a
//! [`SyncGate`] hands the segment back and forth so that at most one batch is
//! outstanding per direction. [`Producer`] and [`Consumer`] put the two
//! together. The `shm` module backs both with files mapped into each peer.

pub mod channel;
pub mod frame;
pub mod gate;
pub mod mailbox;
pub mod message;
pub mod segment;
#[cfg(target_os = "linux")]
pub mod shm;

pub use channel::{local_channel, Consumer, Producer};
pub use frame::{WriteOutcome, RECORD_HEADER_LEN, SEGMENT_HEADER_LEN};
pub use gate::{GateSignals, LocalSignals, Signal, SyncGate, Turn};
pub use mailbox::Mailbox;
pub use message::{Kind, Message};
pub use segment::{LocalSegment, Segment};
