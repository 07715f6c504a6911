//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `RunState`: the stage a crawl run is in (fetching the index, processing pages, done, ...)
//! - `RunTracker`: enforces legal transitions between run states

mod run_state;

pub use run_state::RunState;

use crate::ScrapeError;

/// Tracks the state of a single run and rejects illegal transitions
#[derive(Debug, Default)]
pub struct RunTracker {
    state: RunState,
}

impl RunTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Moves to `next`, failing if the pipeline does not allow it
    pub fn transition(&mut self, next: RunState) -> Result<(), ScrapeError> {
        if !self.state.can_transition_to(next) {
            return Err(ScrapeError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }

        tracing::trace!("Run state: {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }

    /// Marks the run as failed unless it already ended
    ///
    /// Returns the state the run was in when it failed.
    pub fn fail(&mut self) -> RunState {
        let previous = self.state;
        if !previous.is_terminal() {
            tracing::trace!("Run state: {} -> {}", previous, RunState::Failed);
            self.state = RunState::Failed;
        }
        previous
    }
}
