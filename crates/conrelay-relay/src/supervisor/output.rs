//! Background drain of the remote's output direction.

use std::io;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use conrelay_common::TransportError;
use conrelay_transport::shm::SharedRegion;
use conrelay_transport::Consumer;
use tracing::{debug, warn};

use crate::host::RelayEvent;

/// Publish every drained batch on `events`. When the gate closes, which
/// happens once the remote is gone, the last event sent is `ProcessEnded`.
///
/// `events` is bounded: while the host lags, the thread blocks in `send`
/// and does not take the next batch, so the remote producer waits on the
/// segment instead of buffering here.
pub(super) fn spawn_consumer(
    mut consumer: Consumer<SharedRegion>,
    events: mpsc::SyncSender<RelayEvent>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("relay-consumer".into())
        .spawn(move || loop {
            match consumer.recv_batch() {
                Ok(batch) if batch.is_empty() => {}
                Ok(batch) => {
                    debug!(records = batch.len(), "batch received");
                    if events.send(RelayEvent::Batch(batch)).is_err() {
                        break;
                    }
                }
                Err(TransportError::Closed) => {
                    let _ = events.send(RelayEvent::ProcessEnded);
                    break;
                }
                Err(e) => warn!(error = %e, "dropping unreadable batch"),
            }
        })
}
