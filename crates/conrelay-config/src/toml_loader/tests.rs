//! Tests for TOML config loading, creation, and path resolution.

use super::template::default_config_toml;
use super::*;
use crate::schema::RelayConfig;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_conrelay_config.toml"));
    assert!(matches!(
        result,
        Err(conrelay_common::ConfigError::FileNotFound(_))
    ));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[flow]
high_water = 200
tolerance = 4

[surface]
columns = 80
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.flow.high_water, 200);
    assert_eq!(config.flow.tolerance, 4);
    assert_eq!(config.surface.columns, 80);
    assert_eq!(config.surface.rows, 1000);
    assert_eq!(config.transport.segment_capacity, 4096);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(
        result,
        Err(conrelay_common::ConfigError::ParseError(_))
    ));
}

#[test]
fn load_config_with_invalid_values_falls_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[transport]
segment_capacity = 8
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config, RelayConfig::default());
}

#[test]
fn default_template_parses_to_defaults() {
    let config: RelayConfig = toml::from_str(&default_config_toml()).unwrap();
    assert_eq!(config, RelayConfig::default());
}

#[test]
fn create_default_config_writes_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    create_default_config(&path).unwrap();

    let loaded = load_from_path(&path).unwrap();
    assert_eq!(loaded, RelayConfig::default());
}

#[test]
fn default_config_path_ends_with_conrelay() {
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with("conrelay/config.toml"));
    }
}
