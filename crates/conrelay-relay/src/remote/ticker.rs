//! Periodic `FlowTick`s while output is paused.

use std::io;
use std::sync::{mpsc, Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use super::events::RemoteEvent;

#[derive(Default)]
struct TickState {
    armed: bool,
    stopped: bool,
}

type Shared = Arc<(Mutex<TickState>, Condvar)>;

pub(super) struct Ticker {
    shared: Shared,
}

impl Ticker {
    pub(super) fn spawn(
        interval: Duration,
        events: mpsc::SyncSender<RemoteEvent>,
    ) -> io::Result<Self> {
        let shared: Shared = Arc::default();
        let worker = shared.clone();
        thread::Builder::new()
            .name("flow-ticker".into())
            .spawn(move || tick(&worker, interval, &events))?;
        Ok(Self { shared })
    }

    pub(super) fn arm(&self) {
        self.update(|state| state.armed = true);
    }

    pub(super) fn disarm(&self) {
        self.update(|state| state.armed = false);
    }

    fn update(&self, f: impl FnOnce(&mut TickState)) {
        let (lock, cvar) = &*self.shared;
        f(&mut lock_state(lock));
        cvar.notify_all();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.update(|state| state.stopped = true);
    }
}

fn lock_state(lock: &Mutex<TickState>) -> MutexGuard<'_, TickState> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}

fn tick(shared: &Shared, interval: Duration, events: &mpsc::SyncSender<RemoteEvent>) {
    let (lock, cvar) = &**shared;
    let mut state = lock_state(lock);
    loop {
        if state.stopped {
            return;
        }
        if !state.armed {
            state = cvar.wait(state).unwrap_or_else(PoisonError::into_inner);
            continue;
        }
        state = cvar
            .wait_timeout(state, interval)
            .unwrap_or_else(PoisonError::into_inner)
            .0;
        if !state.armed || state.stopped {
            continue;
        }
        // Never block while holding the lock: arm and disarm come from the
        // thread that drains `events`. A tick that does not fit is dropped.
        if let Err(mpsc::TrySendError::Disconnected(_)) = events.try_send(RemoteEvent::FlowTick) {
            return;
        }
    }
}
