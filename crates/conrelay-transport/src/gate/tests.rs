use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::Duration;

use super::*;
use crate::channel::{Consumer, Producer};
use crate::mailbox::Mailbox;
use crate::message::Message;
use crate::segment::LocalSegment;

#[test]
fn new_gate_gives_the_producer_a_fresh_turn() {
    let gate = SyncGate::local();
    assert_eq!(gate.acquire_producer_turn().expect("turn"), Turn::Fresh);
}

#[test]
fn producer_can_take_back_its_unconsumed_batch() {
    let gate = SyncGate::local();
    gate.acquire_producer_turn().expect("turn");
    gate.publish();
    assert_eq!(gate.acquire_producer_turn().expect("turn"), Turn::Append);
}

#[test]
fn take_prefers_earlier_signals() {
    let signals = LocalSignals::new();
    signals.raise(Signal::Ready);
    assert_eq!(
        signals.take(&[Signal::Empty, Signal::Ready]).expect("take"),
        Signal::Empty
    );
    assert_eq!(
        signals.take(&[Signal::Empty, Signal::Ready]).expect("take"),
        Signal::Ready
    );
}

#[test]
fn waits_after_close_fail() {
    let gate = SyncGate::local();
    gate.acquire_producer_turn().expect("turn");
    gate.close();
    assert!(gate.is_closed());
    assert!(matches!(gate.await_ready(), Err(TransportError::Closed)));
    assert!(matches!(
        gate.acquire_producer_turn(),
        Err(TransportError::Closed)
    ));
}

#[test]
fn published_batch_survives_close() {
    let gate = SyncGate::local();
    gate.acquire_producer_turn().expect("turn");
    gate.publish();
    gate.close();
    gate.await_ready().expect("batch published before close");
    assert!(matches!(gate.await_ready(), Err(TransportError::Closed)));
}

// ---------------------------------------------------------------------------
// Handoff journal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Raised(Signal),
    Taken(Signal),
}

/// Local signals that record every raise and take under the same lock that
/// guards the flags, so the journal order is the real order.
#[derive(Default)]
struct JournalSignals {
    state: Mutex<(bool, bool, bool, Vec<Step>)>,
    changed: Condvar,
}

impl JournalSignals {
    fn new() -> Self {
        let signals = Self::default();
        signals.raise(Signal::Empty);
        signals.state.lock().unwrap().3.clear();
        signals
    }

    fn journal(&self) -> Vec<Step> {
        self.state.lock().unwrap().3.clone()
    }
}

impl GateSignals for JournalSignals {
    fn raise(&self, signal: Signal) {
        let mut state = self.state.lock().unwrap();
        match signal {
            Signal::Empty => state.0 = true,
            Signal::Ready => state.1 = true,
        }
        state.3.push(Step::Raised(signal));
        self.changed.notify_all();
    }

    fn take(&self, any_of: &[Signal]) -> Result<Signal, TransportError> {
        let mut state = self.state.lock().unwrap();
        loop {
            for &signal in any_of {
                let slot = match signal {
                    Signal::Empty => &mut state.0,
                    Signal::Ready => &mut state.1,
                };
                if *slot {
                    *slot = false;
                    state.3.push(Step::Taken(signal));
                    return Ok(signal);
                }
            }
            if state.2 {
                return Err(TransportError::Closed);
            }
            state = self.changed.wait(state).unwrap();
        }
    }

    fn close(&self) {
        self.state.lock().unwrap().2 = true;
        self.changed.notify_all();
    }

    fn is_closed(&self) -> bool {
        self.state.lock().unwrap().2
    }
}

#[test]
fn producer_never_starts_a_batch_before_the_previous_one_is_drained() {
    let signals = Arc::new(JournalSignals::new());
    let gate = SyncGate::new(signals.clone());
    let segment = LocalSegment::new(96);
    let mut producer = Producer::new(Mailbox::new(segment.clone()), gate.clone());
    let mut consumer = Consumer::new(Mailbox::new(segment), gate.clone());

    let reader = thread::spawn(move || {
        let mut received = Vec::new();
        while let Ok(batch) = consumer.recv_batch() {
            received.extend(batch);
            thread::sleep(Duration::from_millis(1));
        }
        received
    });

    let sent: Vec<Message> = (0..60)
        .map(|i| Message::update(0, i, format!("row {i:03}")))
        .collect();
    for chunk in sent.chunks(5) {
        producer.send_batch(chunk).expect("send");
    }
    // Wait for the last batch to be drained before closing.
    gate.await_empty().expect("final drain");
    gate.close();
    let received = reader.join().expect("reader");
    assert_eq!(received, sent);

    // Exactly one token exists: Empty starts raised, every take consumes
    // the token and every raise hands it on.
    let mut outstanding = 1i32;
    let mut last_raised = None;
    for step in signals.journal() {
        match step {
            Step::Raised(signal) => {
                outstanding += 1;
                assert_ne!(
                    last_raised,
                    Some(signal),
                    "signal raised twice without being taken"
                );
                last_raised = Some(signal);
            }
            Step::Taken(_) => {
                outstanding -= 1;
                last_raised = None;
            }
        }
        assert!(
            (0..=1).contains(&outstanding),
            "token count {outstanding} after {step:?}"
        );
    }
}
