//! Reading a config file, or the default location on first run.

use std::path::Path;

use conrelay_common::ConfigError;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};
use crate::schema::RelayConfig;
use crate::validation;

/// Parse the TOML file at `path`.
///
/// Missing fields take their defaults. A file that parses but fails
/// validation is replaced by the default config with a warning, so both
/// roles always run with values they can honour.
pub fn load_from_path(path: &Path) -> Result<RelayConfig, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "cannot read {}: {e}",
                path.display()
            )));
        }
    };

    let config: RelayConfig = toml::from_str(&text)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;

    match validation::validate(&config) {
        Ok(()) => {
            info!(path = %path.display(), "config loaded");
            Ok(config)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            Ok(RelayConfig::default())
        }
    }
}

/// Load `<config dir>/conrelay/config.toml`, writing the commented template
/// there when no file exists yet.
pub fn load_default() -> Result<RelayConfig, ConfigError> {
    let path = default_config_path()?;
    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            info!(path = %path.display(), "no config yet, writing template");
            if let Err(e) = create_default_config(&path) {
                warn!(error = %e, "template not written");
            }
            Ok(RelayConfig::default())
        }
        other => other,
    }
}
