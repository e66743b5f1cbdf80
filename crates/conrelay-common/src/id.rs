use serde::{Deserialize, Serialize};
use std::fmt;

/// Short random hex tag used to keep channel directories of one supervisor
/// process apart.
pub fn new_channel_tag() -> String {
    let uuid = uuid::Uuid::new_v4();
    let bytes = uuid.as_bytes();
    format!(
        "{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3]
    )
}

/// Identity of one supervisor/remote channel pair: the supervisor's pid plus
/// a random tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelKey {
    pid: u32,
    tag: String,
}

impl ChannelKey {
    pub fn for_current_process() -> Self {
        Self {
            pid: std::process::id(),
            tag: new_channel_tag(),
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conrelay-{}-{}", self.pid, self.tag)
    }
}
