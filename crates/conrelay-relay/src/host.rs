//! Callback surface for the embedding host and the queue that feeds it.

use std::sync::mpsc;
use std::time::Duration;

use conrelay_transport::Message;
use tracing::debug;

use crate::status;

/// Receives relayed output. Implement at least [`ConsoleHost::on_update`];
/// override [`ConsoleHost::on_update_batch`] to take a whole drained batch
/// at once.
pub trait ConsoleHost: Send {
    fn on_update(&mut self, x: i32, y: i32, text: &str);

    fn on_update_batch(&mut self, batch: &[Message]) {
        for message in batch {
            self.on_update(message.x, message.y, &message.text_lossy());
        }
    }

    fn on_process_ended(&mut self) {}
}

/// Something the background side of a supervisor produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    Batch(Vec<Message>),
    /// Status text, delivered as a `STATUS` record below the last row seen.
    Status(String),
    /// The remote process is gone.
    ProcessEnded,
}

/// Single-owner queue of [`RelayEvent`]s.
pub struct RelayEvents {
    rx: mpsc::Receiver<RelayEvent>,
}

impl RelayEvents {
    pub(crate) fn new(rx: mpsc::Receiver<RelayEvent>) -> Self {
        Self { rx }
    }

    pub fn recv(&self) -> Option<RelayEvent> {
        self.rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<RelayEvent> {
        self.rx.recv_timeout(timeout).ok()
    }

    pub fn try_recv(&self) -> Option<RelayEvent> {
        self.rx.try_recv().ok()
    }
}

/// Drives a [`ConsoleHost`] from [`RelayEvents`] on the owning thread.
pub struct HostDispatcher<H> {
    host: H,
    y_last: i32,
}

impl<H: ConsoleHost> HostDispatcher<H> {
    pub fn new(host: H) -> Self {
        Self { host, y_last: 0 }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Last row delivered to the host.
    pub fn y_last(&self) -> i32 {
        self.y_last
    }

    /// Hand one event to the host. Returns `false` once the process ended.
    pub fn dispatch(&mut self, event: RelayEvent) -> bool {
        match event {
            RelayEvent::Batch(batch) => {
                let Some(last) = batch.last() else {
                    return true;
                };
                self.y_last = last.y;
                self.host.on_update_batch(&batch);
                true
            }
            RelayEvent::Status(text) => {
                self.status(text);
                true
            }
            RelayEvent::ProcessEnded => {
                self.status(status::ended());
                self.host.on_process_ended();
                false
            }
        }
    }

    fn status(&mut self, text: String) {
        debug!(%text, "status message");
        self.y_last += 1;
        let message = Message::status(self.y_last, text);
        self.host.on_update_batch(std::slice::from_ref(&message));
    }

    /// Dispatch until the process ends or every sender is gone.
    pub fn run(mut self, events: &RelayEvents) -> H {
        while let Some(event) = events.recv() {
            if !self.dispatch(event) {
                break;
            }
        }
        self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        updates: Vec<(i32, i32, String)>,
        ended: bool,
    }

    impl ConsoleHost for Recorder {
        fn on_update(&mut self, x: i32, y: i32, text: &str) {
            self.updates.push((x, y, text.to_string()));
        }

        fn on_process_ended(&mut self) {
            self.ended = true;
        }
    }

    #[derive(Default)]
    struct BatchRecorder {
        batches: Vec<Vec<Message>>,
    }

    impl ConsoleHost for BatchRecorder {
        fn on_update(&mut self, _x: i32, _y: i32, _text: &str) {
            panic!("batch hosts receive whole batches");
        }

        fn on_update_batch(&mut self, batch: &[Message]) {
            self.batches.push(batch.to_vec());
        }
    }

    #[test]
    fn per_message_host_sees_every_record() {
        let mut dispatcher = HostDispatcher::new(Recorder::default());
        dispatcher.dispatch(RelayEvent::Batch(vec![
            Message::update(0, 0, "hello"),
            Message::update(0, 1, "world"),
        ]));
        assert_eq!(
            dispatcher.host().updates,
            vec![(0, 0, "hello".to_string()), (0, 1, "world".to_string())]
        );
        assert_eq!(dispatcher.y_last(), 1);
    }

    #[test]
    fn batch_host_receives_the_batch_intact() {
        let mut dispatcher = HostDispatcher::new(BatchRecorder::default());
        let batch = vec![Message::update(0, 3, "a"), Message::update(1, 3, "b")];
        dispatcher.dispatch(RelayEvent::Batch(batch.clone()));
        assert_eq!(dispatcher.host().batches, vec![batch]);
    }

    #[test]
    fn status_goes_below_the_last_row() {
        let mut dispatcher = HostDispatcher::new(BatchRecorder::default());
        dispatcher.dispatch(RelayEvent::Batch(vec![Message::update(0, 7, "x")]));
        dispatcher.dispatch(RelayEvent::Status(status::error("boom")));
        let status = &dispatcher.host().batches[1][0];
        assert_eq!(status.kind, conrelay_transport::Kind::STATUS);
        assert_eq!((status.x, status.y), (0, 8));
        assert_eq!(status.text_lossy(), "CONSOLE PROCESS ERROR boom");
    }

    #[test]
    fn process_end_reports_status_then_callback() {
        let mut dispatcher = HostDispatcher::new(Recorder::default());
        assert!(!dispatcher.dispatch(RelayEvent::ProcessEnded));
        let host = dispatcher.into_host();
        assert_eq!(host.updates, vec![(0, 1, "CONSOLE PROCESS ENDED".to_string())]);
        assert!(host.ended);
    }

    #[test]
    fn run_stops_at_process_end() {
        let (tx, rx) = mpsc::channel();
        let events = RelayEvents::new(rx);
        tx.send(RelayEvent::Batch(vec![Message::update(0, 0, "a")])).unwrap();
        tx.send(RelayEvent::ProcessEnded).unwrap();
        tx.send(RelayEvent::Batch(vec![Message::update(0, 1, "late")])).unwrap();

        let host = HostDispatcher::new(Recorder::default()).run(&events);
        assert!(host.ended);
        assert_eq!(host.updates.len(), 2);
    }

    #[test]
    fn empty_batches_are_ignored() {
        let mut dispatcher = HostDispatcher::new(Recorder::default());
        assert!(dispatcher.dispatch(RelayEvent::Batch(Vec::new())));
        assert!(dispatcher.host().updates.is_empty());
    }
}
