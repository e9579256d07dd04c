use serde::{Deserialize, Serialize};

/// Progress through the document at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Percentage scrolled, 0..=100.
    pub progress: u8,
    pub remaining_words: u64,
    pub remaining_minutes: u64,
}

/// Everything the presentation layer needs for one recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingReport {
    pub snapshot: ProgressSnapshot,
    pub word_count: u64,
    pub total_minutes: u64,
    pub reading_speed: u32,
}

impl ReadingReport {
    pub fn is_complete(&self) -> bool {
        self.snapshot.progress == 100
    }
}
