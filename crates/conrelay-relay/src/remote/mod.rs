//! Remote role: hosts the command line on a PTY and relays its screen to the
//! supervisor through the channel it was handed.

mod events;
mod input;
mod ticker;

use std::path::Path;
use std::sync::mpsc;

use conrelay_common::{RelayError, TransportError};
use conrelay_config::{load_config, RelayConfig};
use conrelay_terminal::{PtyEvent, PtyManager, PtyOptions};
use conrelay_transport::shm::{ChannelDescriptor, Direction};
use conrelay_transport::Message;
use tracing::{debug, error, info, warn};

use crate::lifecycle;
use crate::session::RelaySession;
use crate::status;

use events::RemoteEvent;
use ticker::Ticker;

/// Events the main loop may have pending. PTY output beyond this stays in
/// the kernel's buffer, which is what lets a stalled supervisor stall the
/// hosted program.
const EVENT_QUEUE_DEPTH: usize = 16;

/// Config handed over in the channel directory, with environment overrides
/// applied. Falls back to defaults when it cannot be read.
pub fn channel_config(channel_dir: &Path) -> RelayConfig {
    let loaded = ChannelDescriptor::open(channel_dir)
        .map_err(RelayError::from)
        .and_then(|channel| load_config(Some(&channel.config_path())).map_err(RelayError::from));
    loaded.unwrap_or_else(|e| {
        warn!(error = %e, "using default config");
        let mut config = RelayConfig::default();
        conrelay_config::env::apply_env_overrides(&mut config);
        config
    })
}

/// Entry point of `conrelay __child__`. Returns once the hosted program has
/// ended or the supervisor is gone.
pub fn run(
    supervisor_pid: u32,
    command_line: &str,
    channel_dir: &Path,
    config: &RelayConfig,
) -> Result<(), RelayError> {
    detach();
    let channel = ChannelDescriptor::open(channel_dir)?;
    info!(
        supervisor_pid,
        channel = %channel.path().display(),
        command_line,
        "remote role starting"
    );
    serve(&channel, config, supervisor_pid, command_line)
}

/// Leave the supervisor's session so its terminal is not ours.
fn detach() {
    // SAFETY: setsid takes no arguments and only fails for group leaders.
    if unsafe { libc::setsid() } < 0 {
        debug!(error = %std::io::Error::last_os_error(), "setsid failed");
    }
}

pub(crate) fn serve(
    channel: &ChannelDescriptor,
    config: &RelayConfig,
    supervisor_pid: u32,
    command_line: &str,
) -> Result<(), RelayError> {
    let mut output = channel.producer(Direction::ToSupervisor)?;
    let input = channel.consumer(Direction::ToRemote)?;
    let gates = [output.gate().clone(), input.gate().clone()];

    let (tx, rx) = mpsc::sync_channel::<RemoteEvent>(EVENT_QUEUE_DEPTH);
    let options = PtyOptions {
        cols: config.surface.columns,
        rows: config.surface.visible_rows,
        drain_grace: config.surface.drain_grace(),
    };
    let mut pty = match PtyManager::spawn(command_line, &options, tx.clone()) {
        Ok(pty) => pty,
        Err(e) => {
            error!(error = %e, command_line, "hosted program failed to start");
            let _ = output.send(&Message::status(1, status::error(&e)));
            return Err(e.into());
        }
    };
    let hosted_pid = pty.pid();

    input::spawn_input_relay(input, tx.clone())?;
    let ticker = Ticker::spawn(config.flow.poll_interval(), tx.clone())?;
    {
        let gates = gates.clone();
        let tx = tx.clone();
        lifecycle::watch_parent(supervisor_pid, move || {
            // The main loop may be stuck writing to the PTY, so the hosted
            // program is killed from here.
            if let Some(pid) = hosted_pid {
                lifecycle::kill_process_group(pid);
            }
            for gate in &gates {
                gate.close();
            }
            let _ = tx.try_send(RemoteEvent::PeerLost);
        })?;
    }
    drop(tx);

    let mut session = RelaySession::new(config);
    for event in rx {
        let reaction = match event {
            RemoteEvent::Pty(PtyEvent::Output(bytes)) => session.on_output(&bytes),
            RemoteEvent::Pty(PtyEvent::Exited { pid, code }) => {
                if !is_hosted_exit(hosted_pid, pid) {
                    debug!(pid, "ignoring exit of another process");
                    continue;
                }
                info!(pid, ?code, "hosted program ended");
                break;
            }
            RemoteEvent::Input(text) => session.on_input(&text),
            RemoteEvent::FlowTick => session.on_tick(),
            RemoteEvent::PeerLost => {
                warn!("supervisor went away, stopping hosted program");
                break;
            }
        };

        if reaction.paused {
            ticker.arm();
        }
        if reaction.resumed {
            ticker.disarm();
        }
        if !reaction.terminal_input.is_empty() {
            if let Err(e) = pty.write(&reaction.terminal_input) {
                warn!(error = %e, "terminal input not delivered");
            }
        }
        if !reaction.patches.is_empty() {
            match output.send_batch(&reaction.patches) {
                Ok(_) => {}
                Err(TransportError::Closed) => {
                    warn!("output channel closed");
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    // Published output stays readable; only waits are broken.
    for gate in &gates {
        gate.close();
    }
    pty.kill();
    Ok(())
}

/// Whether an exit report for `pid` is the hosted program's. Without a known
/// pid every report counts.
fn is_hosted_exit(hosted_pid: Option<u32>, pid: u32) -> bool {
    hosted_pid.map_or(true, |hosted| hosted == pid)
}
