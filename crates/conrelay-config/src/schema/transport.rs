use serde::{Deserialize, Serialize};

/// Default mailbox segment size in bytes.
pub const DEFAULT_SEGMENT_CAPACITY: u32 = 4096;

/// Shared-segment transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Size of each direction's mailbox segment, header included
    /// (valid range: 64-1048576).
    pub segment_capacity: u32,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            segment_capacity: DEFAULT_SEGMENT_CAPACITY,
        }
    }
}
