//! Where the supervisor looks for its config, and first-run creation.

use std::path::{Path, PathBuf};

use conrelay_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;
use crate::toml_writer::write_error;

/// `<config dir>/conrelay/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("conrelay").join("config.toml"))
        .ok_or_else(|| ConfigError::ParseError("no config directory on this platform".into()))
}

/// Write the commented template to `path`.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| write_error(parent, e))?;
    }
    std::fs::write(path, default_config_toml()).map_err(|e| write_error(path, e))?;
    info!(path = %path.display(), "default config created");
    Ok(())
}
