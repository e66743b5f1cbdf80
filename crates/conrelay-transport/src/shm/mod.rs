//! Shared-memory backend: segments and gate words live in files of a channel
//! directory, mapped `MAP_SHARED` into both peers.

mod descriptor;
mod futex;
mod region;
mod signals;

pub use descriptor::{ChannelDescriptor, Direction, Purpose};
pub use region::SharedRegion;
pub use signals::SharedSignals;
