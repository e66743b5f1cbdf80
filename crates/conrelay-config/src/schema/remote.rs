//! Location of the binary that runs the remote role.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the binary that hosts the remote role.
pub const REMOTE_BINARY: &str = "conrelay";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RemoteConfig {
    /// Program launched for the remote role. Empty means auto-detect.
    pub program: String,
}

impl RemoteConfig {
    /// Resolve the remote program.
    ///
    /// An explicit `program` wins; otherwise a `conrelay` binary next to the
    /// current executable, falling back to `conrelay` on `PATH`.
    pub fn resolve_program(&self) -> PathBuf {
        if !self.program.is_empty() {
            return PathBuf::from(&self.program);
        }
        let binary = format!("{REMOTE_BINARY}{}", std::env::consts::EXE_SUFFIX);
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(&binary)))
            .filter(|candidate| candidate.is_file())
            .unwrap_or_else(|| PathBuf::from(binary))
    }
}
