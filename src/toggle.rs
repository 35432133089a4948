//! Selection-scoped attribute toggling.
//!
//! One algorithm serves every attribute kind: it only needs the kind's
//! [`RangeSet`] and the payload new spans should carry.
//!
//! The on/off decision is asymmetric. The attribute is turned **on** only
//! when no existing span intersects the selection; any intersection at all
//! turns it **off** across the whole selection. A selection that is half
//! bold therefore ends up entirely plain.

use tracing::trace;

use crate::range::{Selection, TextRange};
use crate::spans::{RangeSet, Span, SpanPayload};

/// What a toggle did to the set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The selection had no coverage and is now fully covered.
    Applied,
    /// Every covered char inside the selection was cleared.
    Removed,
    /// The selection was a caret; nothing changed.
    Ignored,
}

impl ToggleOutcome {
    /// Whether the attribute is now on across the selection.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Toggle an attribute across `selection`.
///
/// Spans straddling a selection boundary keep their residual parts outside
/// the selection, with the original payload.
pub fn toggle<P: SpanPayload>(
    set: &mut RangeSet<P>,
    selection: Selection,
    payload: P,
) -> ToggleOutcome {
    if selection.is_empty() {
        return ToggleOutcome::Ignored;
    }

    let sel = selection.range();
    let existing: Vec<Span<P>> = set.overlapping(sel).cloned().collect();

    if existing.is_empty() {
        trace!(start = sel.start, end = sel.end, "toggle on");
        set.add(sel, payload);
        return ToggleOutcome::Applied;
    }

    trace!(
        start = sel.start,
        end = sel.end,
        spans = existing.len(),
        "toggle off"
    );
    for span in &existing {
        set.replace(span, residuals(span, selection));
    }
    ToggleOutcome::Removed
}

/// The parts of `span` left and right of `selection`.
fn residuals<P: SpanPayload>(span: &Span<P>, selection: Selection) -> Vec<Span<P>> {
    let mut parts = Vec::with_capacity(2);
    let r = span.range;
    if r.start < selection.start {
        let left = TextRange::from_ordered(r.start, selection.start);
        parts.push(Span::new(left, span.payload.clone()));
    }
    if r.end > selection.end {
        let right = TextRange::from_ordered(selection.end, r.end);
        parts.push(Span::new(right, span.payload.clone()));
    }
    parts
}
