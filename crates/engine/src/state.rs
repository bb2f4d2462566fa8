use log::debug;

use crate::error::{EngineError, Result};

/// Lifecycle of one run.
///
/// ```text
/// Idle -> Scanning -> Draining -> Joined -> Reported
///   \________\___________\_________\-----> Aborted
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RunState {
    #[default]
    Idle,
    /// The walker is producing tasks; readers and analysis workers are running.
    Scanning,
    /// The walker is done and its queue closed; workers finish in-flight items.
    Draining,
    /// Every worker has been joined; totals are final.
    Joined,
    Reported,
    Aborted,
}

impl RunState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Reported | Self::Aborted)
    }

    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Scanning)
                | (Self::Scanning, Self::Draining)
                | (Self::Draining, Self::Joined)
                | (Self::Joined, Self::Reported)
        ) || (!self.is_terminal() && matches!(next, Self::Aborted))
    }
}

/// Tracks the state of a run and logs each step.
#[derive(Debug, Default)]
pub struct RunTracker {
    state: RunState,
}

impl RunTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn state(&self) -> RunState {
        self.state
    }

    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTransition`] for a step the lifecycle does not allow.
    pub fn advance(&mut self, next: RunState) -> Result<()> {
        if !self.state.can_advance_to(next) {
            return Err(EngineError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        debug!("run state: {:?} -> {next:?}", self.state);
        self.state = next;
        Ok(())
    }

    /// Move to [`RunState::Aborted`] unless already terminal, then hand the error back.
    pub fn abort(&mut self, error: EngineError) -> EngineError {
        if !self.state.is_terminal() {
            debug!("run state: {:?} -> Aborted ({error})", self.state);
            self.state = RunState::Aborted;
        }
        error
    }
}
