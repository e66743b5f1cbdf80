//! Inbound direction: supervisor input forwarded to the main loop.

use std::io;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use conrelay_common::TransportError;
use conrelay_transport::shm::SharedRegion;
use conrelay_transport::{Consumer, Kind};
use tracing::{debug, warn};

use super::events::RemoteEvent;

pub(super) fn spawn_input_relay(
    mut consumer: Consumer<SharedRegion>,
    events: mpsc::SyncSender<RemoteEvent>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("input-relay".into())
        .spawn(move || loop {
            match consumer.recv_batch() {
                Ok(batch) => {
                    for message in batch {
                        if message.kind != Kind::INPUT {
                            debug!(kind = message.kind.0, "ignoring non-input record");
                            continue;
                        }
                        if events.send(RemoteEvent::Input(message.text)).is_err() {
                            return;
                        }
                    }
                }
                Err(TransportError::Closed) => {
                    let _ = events.send(RemoteEvent::PeerLost);
                    return;
                }
                Err(e) => warn!(error = %e, "dropping unreadable input batch"),
            }
        })
}
