use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Terminal surface allocated by the remote role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Screen buffer width in cells (valid range: 20-1000).
    pub columns: u16,
    /// Screen buffer height in rows; must exceed the flow high-water mark plus
    /// tolerance (valid range: 24-32767).
    pub rows: u16,
    /// Rows reported to the hosted program as its window height
    /// (valid range: 2-rows).
    pub visible_rows: u16,
    /// How long to wait for trailing output after the hosted program exits
    /// (valid range: 0-10000).
    pub drain_grace_ms: u32,
}

impl SurfaceConfig {
    pub fn drain_grace(&self) -> Duration {
        Duration::from_millis(u64::from(self.drain_grace_ms))
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            columns: 120,
            rows: 1000,
            visible_rows: 25,
            drain_grace_ms: 250,
        }
    }
}
