use serde::{Deserialize, Serialize};

/// Measured size of a region of the displayed document.
///
/// `text_len` counts visible characters, with each whitespace run folded
/// to one; `markup_len` is the size of the region's serialized inner
/// markup. Both are counted in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRegion {
    pub text_len: usize,
    pub markup_len: usize,
}

impl ContentRegion {
    pub fn new(text_len: usize, markup_len: usize) -> Self {
        Self {
            text_len,
            markup_len,
        }
    }

    /// True when there is no markup to measure against.
    pub fn is_empty(&self) -> bool {
        self.markup_len == 0
    }
}

/// Scroll state of the viewport over the document, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollGeometry {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollGeometry {
    pub fn new(scroll_top: f64, viewport_height: f64, document_height: f64) -> Self {
        Self {
            scroll_top,
            viewport_height,
            document_height,
        }
    }

    /// Builds geometry from every height the host can report for the
    /// document (body scroll/offset height, root client/scroll/offset
    /// height); the largest one wins.
    pub fn from_candidates(scroll_top: f64, viewport_height: f64, heights: &[f64]) -> Self {
        let document_height = heights
            .iter()
            .copied()
            .filter(|h| h.is_finite())
            .fold(0.0_f64, f64::max);
        Self::new(scroll_top, viewport_height, document_height)
    }

    /// Same viewport and document, different scroll offset.
    pub fn scrolled_to(&self, scroll_top: f64) -> Self {
        Self {
            scroll_top,
            ..*self
        }
    }
}

impl Default for ScrollGeometry {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}
