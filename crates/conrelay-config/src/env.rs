//! Environment overrides applied on top of the loaded TOML.

use tracing::warn;

use crate::schema::RelayConfig;

/// Advisory flag controlling control-character echo in the input relay.
pub const ECHO_VAR: &str = "CONRELAY_ECHO";

/// Apply environment overrides to `config`.
pub fn apply_env_overrides(config: &mut RelayConfig) {
    if let Ok(value) = std::env::var(ECHO_VAR) {
        match parse_flag(&value) {
            Some(echo) => config.input.echo = echo,
            None => warn!("ignoring {ECHO_VAR}={value:?}: expected true or false"),
        }
    }
}

/// Parse a boolean flag the way users tend to write them.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert_eq!(parse_flag("True"), Some(true));
        assert_eq!(parse_flag(" 1 "), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("False"), Some(false));
    }

    #[test]
    fn parse_flag_rejects_garbage() {
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag(""), None);
    }
}
