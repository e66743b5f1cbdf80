//! Tracing setup for both roles.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use conrelay_config::schema::LoggingConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Supervisor,
    Remote,
}

impl Role {
    pub fn log_file_name(self) -> &'static str {
        match self {
            Role::Supervisor => "conrelay_supervisor.log",
            Role::Remote => "conrelay_remote.log",
        }
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `directive`, which
/// wins over the configured level.
///
/// The remote role has no terminal of its own, so it always logs to its
/// file. Returns the log file path when one is used.
pub fn init_logging(
    role: Role,
    config: &LoggingConfig,
    directive: Option<&str>,
) -> Option<PathBuf> {
    let directive = directive
        .map(str::to_string)
        .unwrap_or_else(|| config.level.directive());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directive));

    if role == Role::Remote || config.file_logging {
        let path = config.log_dir().join(role.log_file_name());
        if let Ok(file) = File::create(&path) {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
            return Some(path);
        }
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    None
}
