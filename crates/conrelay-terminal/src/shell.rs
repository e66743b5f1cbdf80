//! Shell selection for running a command line inside the PTY.
//!
//! The hosted command line is handed to the platform shell verbatim so that
//! quoting, pipes and redirections behave the way the caller typed them.

/// The shell used to interpret hosted command lines.
///
/// - On Unix: `/bin/sh`.
/// - On Windows: the `COMSPEC` environment variable, falling back to `cmd.exe`.
pub fn command_shell() -> String {
    #[cfg(windows)]
    {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    }

    #[cfg(not(windows))]
    {
        "/bin/sh".to_string()
    }
}

/// Arguments that make `shell` run `command_line` and exit.
pub fn shell_args(shell: &str, command_line: &str) -> Vec<String> {
    let lower = shell.to_ascii_lowercase();
    if lower.ends_with("cmd.exe") || lower.ends_with("cmd") {
        vec!["/C".to_string(), command_line.to_string()]
    } else {
        vec!["-c".to_string(), command_line.to_string()]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
