//! Reading-time and progress arithmetic.
//!
//! Every function here is pure and total over its inputs: degenerate
//! geometry maps to 100% and out-of-range scroll offsets are clamped.

use crate::types::document::ScrollGeometry;
use crate::types::progress::ProgressSnapshot;
use crate::types::settings::ReadingSpeed;

/// Number of "words" in `text`: every non-whitespace character counts as one.
///
/// This matches how CJK text is measured, where each character is read as a
/// unit, and is what the activation floor and time estimate are based on.
pub fn count_words(text: &str) -> u64 {
    text.chars().filter(|c| !c.is_whitespace()).count() as u64
}

/// Minutes needed to read `word_count` words, rounded up.
pub fn estimate_time(word_count: u64, speed: ReadingSpeed) -> u64 {
    word_count.div_ceil(u64::from(speed.wpm()))
}

/// Percentage of the scrollable height already passed, clamped to 0..=100.
///
/// A document that fits inside the viewport is fully visible and counts as
/// 100% read.
pub fn compute_progress(scroll_top: f64, viewport_height: f64, document_height: f64) -> u8 {
    let remaining_height = document_height - viewport_height;
    if remaining_height.is_nan() || remaining_height <= 0.0 {
        return 100;
    }

    let percent = (scroll_top / remaining_height * 100.0).round();
    if percent.is_nan() {
        return 0;
    }
    percent.clamp(0.0, 100.0) as u8
}

/// Words and minutes left once `progress` percent has been read.
pub fn estimate_remaining(word_count: u64, progress: u8, speed: ReadingSpeed) -> (u64, u64) {
    let left = u128::from(100 - progress.min(100));
    // Half-up rounding of word_count * left / 100.
    let remaining_words = ((u128::from(word_count) * left + 50) / 100) as u64;
    (remaining_words, estimate_time(remaining_words, speed))
}

/// Full snapshot for the current geometry.
pub fn snapshot(word_count: u64, geometry: &ScrollGeometry, speed: ReadingSpeed) -> ProgressSnapshot {
    let progress = compute_progress(
        geometry.scroll_top,
        geometry.viewport_height,
        geometry.document_height,
    );
    let (remaining_words, remaining_minutes) = estimate_remaining(word_count, progress, speed);
    ProgressSnapshot {
        progress,
        remaining_words,
        remaining_minutes,
    }
}

/// Formats `n` with `,` between groups of three digits.
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
