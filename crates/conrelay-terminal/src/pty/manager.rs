//! PtyManager struct and its implementation.

use std::io::{Read, Write};
use std::sync::mpsc;

use conrelay_common::TerminalError;
use portable_pty::{native_pty_system, ChildKiller, CommandBuilder, MasterPty, PtySize};
use tracing::{debug, warn};

use super::types::{PtyEvent, PtyOptions};
use crate::shell::{command_shell, shell_args};

/// Owns the master side of a pseudo-terminal running one hosted command line.
///
/// Two background threads feed the owner's channel: a reader forwarding
/// output, and a waiter that reports the exit once the reader has drained or
/// the grace period ran out. The channel is bounded, so a slow owner stalls
/// the reader and the kernel's PTY buffer then stalls the program.
pub struct PtyManager {
    // Held so the PTY stays open while the program runs.
    _master: Box<dyn MasterPty + Send>,
    writer: Box<dyn Write + Send>,
    killer: Box<dyn ChildKiller + Send + Sync>,
    pid: Option<u32>,
}

impl PtyManager {
    /// Run `command_line` through the platform shell inside a new PTY.
    pub fn spawn<E>(
        command_line: &str,
        options: &PtyOptions,
        events: mpsc::SyncSender<E>,
    ) -> Result<Self, TerminalError>
    where
        E: From<PtyEvent> + Send + 'static,
    {
        let pty_system = native_pty_system();

        let pair = pty_system
            .openpty(PtySize {
                rows: options.rows,
                cols: options.cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| TerminalError::SpawnFailed(e.to_string()))?;

        let shell = command_shell();
        let mut cmd = CommandBuilder::new(&shell);
        cmd.args(shell_args(&shell, command_line));
        cmd.env("TERM", "dumb");
        if let Ok(cwd) = std::env::current_dir() {
            cmd.cwd(cwd);
        }

        let mut child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| TerminalError::SpawnFailed(e.to_string()))?;
        // Only the child may hold the slave, so the reader sees EOF on exit.
        drop(pair.slave);

        let pid = child.process_id();
        let killer = child.clone_killer();

        let mut reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| TerminalError::SpawnFailed(e.to_string()))?;

        let writer = pair
            .master
            .take_writer()
            .map_err(|e| TerminalError::SpawnFailed(e.to_string()))?;

        let (eof_tx, eof_rx) = mpsc::channel::<()>();
        let output_tx = events.clone();
        std::thread::Builder::new()
            .name("pty-reader".into())
            .spawn(move || {
                let mut buf = [0u8; 8192];
                loop {
                    match reader.read(&mut buf) {
                        Ok(0) => break,
                        Ok(n) => {
                            if output_tx.send(PtyEvent::Output(buf[..n].to_vec()).into()).is_err() {
                                break;
                            }
                        }
                        Err(_) => break,
                    }
                }
                let _ = eof_tx.send(());
            })?;

        let drain_grace = options.drain_grace;
        std::thread::Builder::new()
            .name("pty-waiter".into())
            .spawn(move || {
                let code = match child.wait() {
                    Ok(status) => Some(status.exit_code()),
                    Err(e) => {
                        warn!(error = %e, "waiting for hosted program failed");
                        None
                    }
                };
                if eof_rx.recv_timeout(drain_grace).is_err() {
                    debug!("pty output not drained within grace period");
                }
                let _ = events.send(
                    PtyEvent::Exited {
                        pid: pid.unwrap_or(0),
                        code,
                    }
                    .into(),
                );
            })?;

        debug!(pid, command_line, "hosted program started");

        Ok(PtyManager {
            _master: pair.master,
            writer,
            killer,
            pid,
        })
    }

    /// Process id of the hosted program, when the platform reports one.
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Write bytes into the PTY as if typed at the keyboard.
    pub fn write(&mut self, data: &[u8]) -> Result<(), TerminalError> {
        self.writer.write_all(data)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Kill the hosted program. The waiter thread still reports the exit.
    pub fn kill(&mut self) {
        let _ = self.killer.kill();
    }
}

impl Drop for PtyManager {
    fn drop(&mut self) {
        let _ = self.killer.kill();
    }
}
