mod content;
mod core;
mod cursor;
mod damage;
mod erase;
mod scroll;
mod types;

pub use self::core::*;
pub use types::*;

// ===========================================================================
// Tests
// ===========================================================================
