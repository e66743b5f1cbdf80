//! Supervisor role: owns the channel, launches the remote process, writes
//! input to it and turns its output into [`RelayEvent`]s.

mod command;
mod output;

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use conrelay_common::{ChannelKey, RelayError, TransportError};
use conrelay_config::{save_config_to_path, RelayConfig};
use conrelay_transport::shm::{ChannelDescriptor, Direction, SharedRegion};
use conrelay_transport::{Message, Producer, SyncGate};
use tracing::{error, info, warn};

use crate::host::{ConsoleHost, HostDispatcher, RelayEvent, RelayEvents};
use crate::lifecycle;
use crate::status;

/// Batches the consumer thread may queue ahead of the host. Once full, the
/// consumer stops releasing the output segment and the remote producer waits.
pub(crate) const EVENT_QUEUE_DEPTH: usize = 4;

/// Handle on one relayed console.
///
/// A supervisor whose launch failed is inert: the failure was reported as a
/// status event and every [`Supervisor::write`] fails with
/// `RelayError::Inert`.
pub struct Supervisor {
    link: Option<Link>,
}

struct Link {
    channel: ChannelDescriptor,
    input: Producer<SharedRegion>,
    gates: Vec<SyncGate>,
    remote_pid: u32,
    exited: Arc<AtomicBool>,
}

impl Supervisor {
    /// Launch `command_line` in a remote process.
    ///
    /// Never fails outright; see [`Supervisor::is_inert`].
    pub fn launch(config: &RelayConfig, command_line: &str) -> (Supervisor, RelayEvents) {
        let (tx, rx) = mpsc::sync_channel(EVENT_QUEUE_DEPTH);
        let link = match try_launch(config, command_line, &tx) {
            Ok(link) => {
                info!(
                    pid = link.remote_pid,
                    channel = %link.channel.path().display(),
                    command_line,
                    "remote process started"
                );
                Some(link)
            }
            Err(e) => {
                error!(error = %e, command_line, "console launch failed");
                report(&tx, status::error(&e));
                None
            }
        };
        (Supervisor { link }, RelayEvents::new(rx))
    }

    /// Launch and feed `host` from a dispatcher thread. The thread returns
    /// the host once the process has ended.
    pub fn spawn_with_host<H>(
        config: &RelayConfig,
        command_line: &str,
        host: H,
    ) -> Result<(Supervisor, JoinHandle<H>), RelayError>
    where
        H: ConsoleHost + 'static,
    {
        let (supervisor, events) = Self::launch(config, command_line);
        let handle = thread::Builder::new()
            .name("host-dispatcher".into())
            .spawn(move || HostDispatcher::new(host).run(&events))?;
        Ok((supervisor, handle))
    }

    pub fn is_inert(&self) -> bool {
        self.link.is_none()
    }

    pub fn remote_pid(&self) -> Option<u32> {
        self.link.as_ref().map(|link| link.remote_pid)
    }

    pub fn channel_path(&self) -> Option<&Path> {
        self.link.as_ref().map(|link| link.channel.path())
    }

    /// Send `text` to the hosted program as typed input.
    ///
    /// Blocks while the remote has not consumed earlier input and the
    /// segment is full. Text longer than one segment is truncated.
    pub fn write(&mut self, text: &str) -> Result<(), RelayError> {
        let link = self.link.as_mut().ok_or(RelayError::Inert)?;
        if link.input.gate().is_closed() {
            return Err(TransportError::Closed.into());
        }
        link.input.send(&Message::input(text.as_bytes()))?;
        Ok(())
    }

    pub fn writeline(&mut self, text: &str) -> Result<(), RelayError> {
        self.write(&format!("{text}\n"))
    }
}

fn try_launch(
    config: &RelayConfig,
    command_line: &str,
    events: &mpsc::SyncSender<RelayEvent>,
) -> Result<Link, RelayError> {
    let key = ChannelKey::for_current_process();
    let capacity = config.transport.segment_capacity as usize;
    let channel = ChannelDescriptor::create(&std::env::temp_dir(), &key, capacity)?;
    connect(config, command_line, &channel, events).inspect_err(|_| {
        if !channel.path().exists() {
            return;
        }
        if let Err(e) = channel.remove() {
            warn!(error = %e, "failed to remove channel directory");
        }
    })
}

fn connect(
    config: &RelayConfig,
    command_line: &str,
    channel: &ChannelDescriptor,
    events: &mpsc::SyncSender<RelayEvent>,
) -> Result<Link, RelayError> {
    save_config_to_path(config, &channel.config_path())?;
    let input = channel.producer(Direction::ToRemote)?;
    let output = channel.consumer(Direction::ToSupervisor)?;
    let gates = vec![input.gate().clone(), output.gate().clone()];

    let program = config.remote.resolve_program();
    let mut remote =
        command::remote_command(&program, std::process::id(), command_line, channel.path());
    let child = remote.spawn().map_err(|e| {
        let shown = command::describe(&remote);
        report(events, status::could_not_start(&shown));
        RelayError::Launch(format!("{}: {e}", program.display()))
    })?;

    // From here on dropping the link tears everything down.
    let exited = Arc::new(AtomicBool::new(false));
    let link = Link {
        channel: channel.clone(),
        input,
        gates: gates.clone(),
        remote_pid: child.id(),
        exited: exited.clone(),
    };

    output::spawn_consumer(output, events.clone())?;
    lifecycle::watch_child(child, move |status| {
        exited.store(true, Ordering::Release);
        info!(?status, "remote process ended");
        for gate in &gates {
            gate.close();
        }
    })?;

    Ok(link)
}

/// Queue a launch status without waiting on the host.
fn report(events: &mpsc::SyncSender<RelayEvent>, text: String) {
    if let Err(mpsc::TrySendError::Full(_)) = events.try_send(RelayEvent::Status(text)) {
        warn!("event queue full, launch status dropped");
    }
}

impl Drop for Link {
    fn drop(&mut self) {
        for gate in &self.gates {
            gate.close();
        }
        if !self.exited.load(Ordering::Acquire) {
            lifecycle::terminate(self.remote_pid);
        }
        if let Err(e) = self.channel.remove() {
            warn!(error = %e, "failed to remove channel directory");
        }
    }
}
