use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures of the shared-segment transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The segment contents cannot be parsed; the batch is discarded.
    #[error("corrupt segment: {0}")]
    Corrupt(String),

    /// The gate was closed because the peer went away.
    #[error("channel closed")]
    Closed,

    #[error("failed to map {path}: {reason}")]
    Map { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors originating from PTY and terminal-surface operations.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    #[error("failed to spawn process: {0}")]
    SpawnFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Terminal(#[from] TerminalError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("could not launch remote process: {0}")]
    Launch(String),

    #[error("console process is not running")]
    Inert,
}

impl RelayError {
    /// True when the error means the other side of the channel is gone.
    pub fn is_peer_lost(&self) -> bool {
        matches!(self, RelayError::Transport(TransportError::Closed))
    }
}
