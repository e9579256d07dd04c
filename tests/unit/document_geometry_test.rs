//! Tests for scroll geometry built from host-reported document heights.

use readpace::services::estimator::compute_progress;
use readpace::services::html_document::{DocumentMeasurement, HtmlDocument};
use readpace::types::document::ScrollGeometry;

#[test]
fn test_largest_reported_height_wins() {
    // body scroll/offset height, root client/scroll/offset height
    let heights = [2400.0, 2380.0, 900.0, 3100.0, 2400.0];
    let geometry = ScrollGeometry::from_candidates(120.0, 900.0, &heights);
    assert_eq!(geometry.document_height, 3100.0);
    assert_eq!(geometry.scroll_top, 120.0);
    assert_eq!(geometry.viewport_height, 900.0);
}

#[test]
fn test_non_finite_heights_are_ignored() {
    let geometry = ScrollGeometry::from_candidates(
        0.0,
        900.0,
        &[f64::NAN, 2000.0, f64::INFINITY, f64::NEG_INFINITY],
    );
    assert_eq!(geometry.document_height, 2000.0);
}

#[test]
fn test_no_usable_height_is_zero() {
    assert_eq!(ScrollGeometry::from_candidates(0.0, 900.0, &[]).document_height, 0.0);
    assert_eq!(
        ScrollGeometry::from_candidates(0.0, 900.0, &[f64::NAN]).document_height,
        0.0
    );
}

#[test]
fn test_progress_uses_largest_height() {
    // A smaller candidate alone would already report the end of the page.
    let geometry = ScrollGeometry::from_candidates(1000.0, 1000.0, &[2000.0, 3000.0]);
    let progress = compute_progress(
        geometry.scroll_top,
        geometry.viewport_height,
        geometry.document_height,
    );
    assert_eq!(progress, 50);
}

#[test]
fn test_document_keeps_host_geometry() {
    let mut doc = HtmlDocument::parse("<p>text</p>", "https://example.com/a");
    let geometry = ScrollGeometry::from_candidates(0.0, 800.0, &[1600.0, 2400.0]);
    doc.set_geometry(geometry.scrolled_to(400.0));

    assert_eq!(doc.geometry().document_height, 2400.0);
    assert_eq!(doc.geometry().scroll_top, 400.0);
}
