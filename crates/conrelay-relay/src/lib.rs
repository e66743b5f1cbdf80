//! Console relay: runs a command line on a terminal surface in a separate
//! remote process and streams its screen back to the supervisor as ordered
//! line patches.
//!
//! The supervisor side is [`Supervisor`]; hosts receive output through
//! [`ConsoleHost`]. The remote side is [`remote::run`], entered through the
//! `conrelay __child__` subcommand.

pub mod coalescer;
pub mod flow;
pub mod host;
#[cfg(unix)]
pub mod lifecycle;
pub mod linebuffer;
pub mod logging;
#[cfg(target_os = "linux")]
pub mod remote;
pub mod session;
pub mod status;
#[cfg(target_os = "linux")]
pub mod supervisor;

pub use coalescer::{LinePatch, ScreenDeltaCoalescer};
pub use flow::{FlowController, FlowState};
pub use host::{ConsoleHost, HostDispatcher, RelayEvent, RelayEvents};
pub use linebuffer::{LineBuffer, LinePrinter};
pub use session::{Reaction, RelaySession};
#[cfg(target_os = "linux")]
pub use supervisor::Supervisor;

/// First positional token of a remote-role invocation.
pub const CHILD_MARKER: &str = "__child__";
