//! Hyperlink ranges.
//!
//! Unlike styles, links are never toggled: they are embedded over a range,
//! removed at a point, or looked up. A char belongs to at most one link, and
//! embedding over an existing link is rejected rather than merged.

use tracing::debug;

use crate::error::{Error, Result};
use crate::range::TextRange;
use crate::spans::{RangeSet, Span};

/// Disjoint hyperlink ranges, each carrying its href.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkTable {
    spans: RangeSet<String>,
}

impl LinkTable {
    /// Create an empty link table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Check if there are no links.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// All links in ascending order.
    #[must_use]
    pub fn spans(&self) -> &[Span<String>] {
        self.spans.spans()
    }

    /// The underlying range set.
    #[must_use]
    pub fn ranges(&self) -> &RangeSet<String> {
        &self.spans
    }

    pub(crate) fn ranges_mut(&mut self) -> &mut RangeSet<String> {
        &mut self.spans
    }

    /// Link `range` to `href`.
    ///
    /// A zero-width range is silently ignored. Touching a link with the same
    /// href extends it; overlapping any existing link fails with
    /// [`Error::OverlappingLink`] and leaves the table unchanged.
    pub fn embed(&mut self, range: TextRange, href: &str) -> Result<()> {
        if range.is_empty() {
            return Ok(());
        }
        if let Some(existing) = self.spans.overlapping(range).next() {
            return Err(Error::OverlappingLink {
                start: range.start,
                end: range.end,
                existing_start: existing.range.start,
                existing_end: existing.range.end,
            });
        }
        debug!(start = range.start, end = range.end, href, "embed link");
        self.spans.add(range, href.to_owned());
        Ok(())
    }

    /// Remove every link containing `pos`.
    ///
    /// Returns how many links were removed.
    pub fn remove_at(&mut self, pos: usize) -> usize {
        let hit = TextRange::from_ordered(pos, pos.saturating_add(1));
        let removed = self.spans.take_overlapping(hit).len();
        if removed > 0 {
            debug!(pos, removed, "remove link");
        }
        removed
    }

    /// The href of the link containing `pos`, if any.
    #[must_use]
    pub fn lookup_at(&self, pos: usize) -> Option<&str> {
        self.spans.at(pos).map(|span| span.payload.as_str())
    }

    /// Check the table invariants.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.spans.is_normalized()
    }
}
