//! PTY event and option types.

use std::time::Duration;

/// Something the PTY side produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PtyEvent {
    /// Raw bytes written by the hosted program.
    Output(Vec<u8>),
    /// The hosted program exited and its remaining output has been drained.
    Exited { pid: u32, code: Option<u32> },
}

/// How to size the PTY and how long to wait for trailing output on exit.
#[derive(Debug, Clone)]
pub struct PtyOptions {
    pub cols: u16,
    pub rows: u16,
    pub drain_grace: Duration,
}
