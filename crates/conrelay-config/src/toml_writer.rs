//! Serialise the effective config for the remote process.
//!
//! The supervisor drops `config.toml` into the channel directory before it
//! starts the remote, which loads it with [`crate::load_config`]. The file is
//! written next to its final name and renamed into place, so the remote
//! never parses a partial file.

use std::path::{Path, PathBuf};

use conrelay_common::ConfigError;
use tracing::debug;

use crate::schema::RelayConfig;

pub fn save_config_to_path(config: &RelayConfig, path: &Path) -> Result<(), ConfigError> {
    let text = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::ParseError(format!("cannot serialise config: {e}")))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| write_error(parent, e))?;
    }

    let staging = staging_path(path);
    std::fs::write(&staging, text.as_bytes()).map_err(|e| write_error(&staging, e))?;
    if let Err(e) = std::fs::rename(&staging, path) {
        let _ = std::fs::remove_file(&staging);
        return Err(write_error(path, e));
    }

    debug!(path = %path.display(), "config written");
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

pub(crate) fn write_error(path: &Path, err: std::io::Error) -> ConfigError {
    ConfigError::ParseError(format!("cannot write {}: {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LogLevel;
    use tempfile::TempDir;

    #[test]
    fn remote_reads_back_what_the_supervisor_wrote() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = RelayConfig::default();
        config.flow.high_water = 150;
        config.input.echo = false;
        config.logging.level = LogLevel::Debug;
        save_config_to_path(&config, &path).unwrap();

        assert_eq!(crate::load_config(Some(&path)).unwrap().flow.high_water, 150);
        let parsed: RelayConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn overwrites_an_existing_file_without_leftovers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "garbage = [").unwrap();

        save_config_to_path(&RelayConfig::default(), &path).unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("config.toml")]);
    }

    #[test]
    fn missing_parent_is_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conrelay-1-00000000").join("config.toml");
        save_config_to_path(&RelayConfig::default(), &path).unwrap();
        assert!(path.is_file());
    }
}
