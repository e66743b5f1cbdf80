pub mod errors;
pub mod id;

pub use errors::{ConfigError, RelayError, TerminalError, TransportError};
pub use id::{new_channel_tag, ChannelKey};

pub type Result<T> = std::result::Result<T, RelayError>;
