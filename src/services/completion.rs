//! One-shot completion detection.
//!
//! [`CompletionState`] is threaded through every recomputation of a page
//! load. It reports [`CompletionTransition::JustCompleted`] the first time
//! progress is observed at 100 and never again for the same page, no matter
//! how often the reader scrolls away and back.

use serde::{Deserialize, Serialize};

/// Phase of the current page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionPhase {
    InProgress,
    /// Progress has reached 100 at least once.
    Completed,
}

/// What a single observation did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionTransition {
    /// Still reading, or back below 100 after completing.
    None,
    /// First observation at 100; the completion effect must run now.
    JustCompleted,
}

/// Progress remembered between recomputations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompletionState {
    last_observed_progress: Option<u8>,
    completed: bool,
}

impl CompletionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `progress` and reports whether it completes the page.
    ///
    /// The previous value is read exactly once, together with the update.
    pub fn observe(&mut self, progress: u8) -> CompletionTransition {
        let previous = self.last_observed_progress.replace(progress);
        if progress == 100 && previous != Some(100) && !self.completed {
            self.completed = true;
            CompletionTransition::JustCompleted
        } else {
            CompletionTransition::None
        }
    }

    pub fn last_observed_progress(&self) -> Option<u8> {
        self.last_observed_progress
    }

    pub fn phase(&self) -> CompletionPhase {
        if self.completed {
            CompletionPhase::Completed
        } else {
            CompletionPhase::InProgress
        }
    }
}
