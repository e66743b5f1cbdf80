//! Pause/resume state machine that bounds how far the remote screen can run
//! ahead of what has been relayed.

use conrelay_config::schema::FlowConfig;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Running,
    /// The hosted program was told to stop; waiting for relaying to catch up.
    Paused,
    /// Caught up; the resume cycle is in progress.
    ResumingWait,
}

#[derive(Debug, Clone)]
pub struct FlowController {
    state: FlowState,
    high_water: usize,
    tolerance: usize,
}

impl FlowController {
    pub fn new(high_water: usize, tolerance: usize) -> Self {
        Self {
            state: FlowState::Running,
            high_water,
            tolerance,
        }
    }

    pub fn from_config(config: &FlowConfig) -> Self {
        Self::new(config.high_water as usize, config.tolerance as usize)
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == FlowState::Running
    }

    /// Record the latest row touched. Returns `true` when the caller must
    /// pause the hosted program now.
    pub fn observe(&mut self, y_current: usize) -> bool {
        if self.state == FlowState::Running && y_current > self.high_water {
            debug!(y_current, high_water = self.high_water, "pausing output");
            self.state = FlowState::Paused;
            return true;
        }
        false
    }

    /// One tick of the resume monitor. Returns `true` when the relayed rows
    /// are within the tolerance of the real cursor and the caller must run
    /// the resume cycle.
    pub fn poll(&mut self, y_current: usize, cursor_row: usize) -> bool {
        if self.state != FlowState::Paused {
            return false;
        }
        if y_current >= cursor_row.saturating_sub(self.tolerance) {
            debug!(y_current, cursor_row, "caught up, resuming");
            self.state = FlowState::ResumingWait;
            return true;
        }
        false
    }

    /// Input for the hosted program arrived while paused. Returns `true`
    /// when the caller must run the resume cycle.
    pub fn interrupt(&mut self) -> bool {
        if self.state == FlowState::Paused {
            self.state = FlowState::ResumingWait;
            return true;
        }
        false
    }

    /// The resume cycle has finished.
    pub fn complete_resume(&mut self) {
        self.state = FlowState::Running;
    }
}
