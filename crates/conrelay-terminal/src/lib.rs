//! Terminal surface for the remote role: a PTY running the hosted program,
//! a screen buffer fed by a VTE parser, and per-row damage spans that act as
//! the region-change notification source.

pub mod input;
pub mod pty;
pub mod screen;
pub mod shell;
pub mod vte_handler;

pub use input::{apply_backspaces, encode_input, BACKSPACE_SEQUENCE};
pub use pty::{PtyEvent, PtyManager, PtyOptions};
pub use screen::{Cell, CursorState, RegionChange, Screen};
pub use vte_handler::SurfaceParser;
