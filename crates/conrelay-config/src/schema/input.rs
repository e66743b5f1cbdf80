use serde::{Deserialize, Serialize};

/// Input relay settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Forward control characters to the terminal when decoding relayed
    /// input. Overridden by `CONRELAY_ECHO`.
    pub echo: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { echo: true }
    }
}
