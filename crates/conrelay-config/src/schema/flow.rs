//! Pause/resume flow-control settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Flow-control settings for the remote role.
///
/// Once the latest touched row passes `high_water` the remote process is
/// paused; a monitor then polls every `poll_interval_ms` until the relayed
/// rows are within `tolerance` of the real cursor, and resumes it on a fresh
/// logical page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Row threshold that triggers a pause (valid range: 1-100000).
    pub high_water: u32,
    /// Poll interval of the resume monitor (valid range: 10-10000).
    pub poll_interval_ms: u32,
    /// Rows the relayed position may lag behind the cursor and still count
    /// as caught up (valid range: 0-1000).
    pub tolerance: u32,
    /// Input written to the terminal to suspend output (default XOFF).
    pub pause_input: String,
    /// Input written to the terminal to resume output (default XON).
    pub resume_input: String,
}

impl FlowConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.poll_interval_ms))
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            high_water: 400,
            poll_interval_ms: 200,
            tolerance: 10,
            pause_input: "\u{13}".into(),
            resume_input: "\u{11}".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_config_defaults() {
        let config = FlowConfig::default();
        assert_eq!(config.high_water, 400);
        assert_eq!(config.poll_interval(), Duration::from_millis(200));
        assert_eq!(config.tolerance, 10);
        assert_eq!(config.pause_input.as_bytes(), b"\x13");
        assert_eq!(config.resume_input.as_bytes(), b"\x11");
    }

    #[test]
    fn control_inputs_survive_toml() {
        let config = FlowConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: FlowConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn flow_config_partial_toml() {
        let config: FlowConfig = toml::from_str(
            r#"
poll_interval_ms = 50
resume_input = "\u001b"
"#,
        )
        .unwrap();
        assert_eq!(config.poll_interval_ms, 50);
        assert_eq!(config.resume_input, "\u{1b}");
        assert_eq!(config.high_water, 400);
    }
}
