//! conrelay configuration.
//!
//! TOML-based configuration for both relay roles. Every section uses serde
//! defaults so partial files work, and the supervisor hands its effective
//! config to the remote process by writing it into the channel directory.
//!
//! ```rust,no_run
//! use conrelay_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("segment capacity: {}", config.transport.segment_capacity);
//! ```

pub mod env;
pub mod schema;
pub mod toml_loader;
pub mod toml_writer;
pub mod validation;

pub use schema::{RelayConfig, CONFIG_SCHEMA_VERSION};
pub use toml_writer::save_config_to_path;

use std::path::Path;

use conrelay_common::ConfigError;

/// Load config from `path`, or from the platform default location when
/// `path` is `None`, then apply environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    let mut config = match path {
        Some(p) => toml_loader::load_from_path(p)?,
        None => toml_loader::load_default()?,
    };
    env::apply_env_overrides(&mut config);
    Ok(config)
}
