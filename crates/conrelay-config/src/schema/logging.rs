use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `tracing` filter directive for the conrelay crates at this level.
    pub fn directive(self) -> String {
        let level = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        format!("conrelay={level}")
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Write each role's log to a file in `directory`.
    pub file_logging: bool,
    /// Log directory. Empty means the system temp directory.
    pub directory: String,
}

impl LoggingConfig {
    pub fn log_dir(&self) -> PathBuf {
        if self.directory.is_empty() {
            std::env::temp_dir()
        } else {
            PathBuf::from(&self.directory)
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            file_logging: true,
            directory: String::new(),
        }
    }
}
