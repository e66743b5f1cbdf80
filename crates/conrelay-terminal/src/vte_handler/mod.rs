mod csi_dispatch;
mod esc;
mod handler;
mod perform;

pub use handler::*;

// ===========================================================================
// Tests
// ===========================================================================
