use std::path::Path;
use std::process::{Command, Stdio};

use crate::CHILD_MARKER;

/// `<program> __child__ <supervisor pid> <command line> --channel <dir>`
pub(crate) fn remote_command(
    program: &Path,
    supervisor_pid: u32,
    command_line: &str,
    channel: &Path,
) -> Command {
    let mut command = Command::new(program);
    command
        .arg(CHILD_MARKER)
        .arg(supervisor_pid.to_string())
        .arg(command_line)
        .arg("--channel")
        .arg(channel)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    command
}

/// The command as a single line, for status messages.
pub(crate) fn describe(command: &Command) -> String {
    let mut parts = vec![command.get_program().to_string_lossy().into_owned()];
    parts.extend(command.get_args().map(|arg| arg.to_string_lossy().into_owned()));
    parts.join(" ")
}
