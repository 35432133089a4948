#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Not every test binary uses every helper

use std::sync::Once;

use richtext::{RichText, StyleKind};
use tracing::Level;

static INIT: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
pub fn setup_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_test_writer()
            .try_init();
    });
}

/// `(start, end)` pairs of one style kind.
pub fn style_spans(doc: &RichText, kind: StyleKind) -> Vec<(usize, usize)> {
    doc.styles()
        .get(kind)
        .iter()
        .map(|s| (s.range.start, s.range.end))
        .collect()
}

/// `(start, end, href)` triples of every link.
pub fn link_spans(doc: &RichText) -> Vec<(usize, usize, String)> {
    doc.links()
        .spans()
        .iter()
        .map(|s| (s.range.start, s.range.end, s.payload.clone()))
        .collect()
}

/// Check every structural invariant of a document.
pub fn assert_invariants(doc: &RichText) {
    let len = doc.len_chars();
    assert!(doc.styles().is_normalized(), "styles not normalized: {doc:?}");
    assert!(doc.links().is_normalized(), "links not normalized: {doc:?}");
    for (_, set) in doc.styles().iter() {
        for span in set {
            assert!(span.range.end <= len, "style span past end: {doc:?}");
        }
    }
    for span in doc.links().spans() {
        assert!(span.range.end <= len, "link span past end: {doc:?}");
    }
}
