//! Text-to-markup density of a document region.
//!
//! A region made mostly of prose has a density close to 1; navigation bars,
//! app shells and widget-heavy layouts sit far lower because most of their
//! serialized size is tags and attributes.

use crate::types::document::ContentRegion;

/// Ratio of visible text to serialized markup.
///
/// The caller must not pass an empty region; use [`region_density`] when
/// the region may be empty.
pub fn text_density(region: &ContentRegion) -> f64 {
    debug_assert!(region.markup_len > 0, "density of an empty region");
    region.text_len as f64 / region.markup_len as f64
}

/// Density of a region, or `None` when the region has no markup at all.
/// `None` must be read as "not dense enough".
pub fn region_density(region: &ContentRegion) -> Option<f64> {
    if region.is_empty() {
        None
    } else {
        Some(text_density(region))
    }
}
