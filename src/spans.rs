//! Disjoint, merge-normalized attribute ranges.
//!
//! A [`RangeSet`] holds every range one attribute kind covers. Spans are kept
//! sorted by start, pairwise disjoint, and no two adjacent spans carry
//! payloads that merge with each other. Every mutator restores those
//! invariants before returning, so [`RangeSet::is_normalized`] always holds
//! between calls.
//!
//! ```
//! use richtext::{RangeSet, TextRange};
//!
//! let mut bold: RangeSet<()> = RangeSet::new();
//! bold.add(TextRange::new(0, 4).unwrap(), ());
//! bold.add(TextRange::new(4, 9).unwrap(), ());
//! assert_eq!(bold.len(), 1); // adjacent ranges merged
//! assert_eq!(bold.spans()[0].range, TextRange::new(0, 9).unwrap());
//! ```

use std::fmt;

use crate::range::TextRange;

/// Payload attached to every span of a [`RangeSet`].
///
/// The merge predicate decides when two touching spans collapse into one.
pub trait SpanPayload: Clone + PartialEq + fmt::Debug {
    /// Whether a span with this payload may be unified with `other`.
    fn merges_with(&self, other: &Self) -> bool;
}

/// Presence-only styles: any two spans merge.
impl SpanPayload for () {
    fn merges_with(&self, _other: &Self) -> bool {
        true
    }
}

/// Hyperlink targets: spans merge only when they point at the same href.
impl SpanPayload for String {
    fn merges_with(&self, other: &Self) -> bool {
        self == other
    }
}

/// A range tagged with a payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Span<P> {
    pub range: TextRange,
    pub payload: P,
}

impl<P> Span<P> {
    /// Create a new span.
    #[must_use]
    pub const fn new(range: TextRange, payload: P) -> Self {
        Self { range, payload }
    }

    /// Check if this span covers `pos`.
    #[must_use]
    pub const fn contains(&self, pos: usize) -> bool {
        self.range.contains(pos)
    }
}

/// How ranges react to text inserted strictly inside them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InsertMode {
    /// The range grows to cover the new text (typing inside bold stays bold).
    #[default]
    Extend,
    /// The range is cut around the new text, which brings its own formatting.
    Split,
}

/// Sorted, disjoint, merge-normalized set of spans for one attribute kind.
#[derive(Clone, PartialEq, Eq)]
pub struct RangeSet<P> {
    spans: Vec<Span<P>>,
}

impl<P> Default for RangeSet<P> {
    fn default() -> Self {
        Self { spans: Vec::new() }
    }
}

impl<P: fmt::Debug> fmt::Debug for RangeSet<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.spans).finish()
    }
}

impl<P: SpanPayload> RangeSet<P> {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of spans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Check if the set holds no spans.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// All spans in ascending start order.
    #[must_use]
    pub fn spans(&self) -> &[Span<P>] {
        &self.spans
    }

    /// Iterate over all spans in ascending start order.
    pub fn iter(&self) -> std::slice::Iter<'_, Span<P>> {
        self.spans.iter()
    }

    /// Remove every span.
    pub fn clear(&mut self) {
        self.spans.clear();
    }

    /// Spans with a non-empty intersection with `range`, in ascending order.
    ///
    /// An empty query range intersects nothing.
    pub fn overlapping(&self, range: TextRange) -> impl Iterator<Item = &Span<P>> {
        let first = if range.is_empty() {
            self.spans.len()
        } else {
            self.spans.partition_point(|s| s.range.end <= range.start)
        };
        self.spans[first..]
            .iter()
            .take_while(move |s| s.range.start < range.end)
            .filter(move |s| s.range.overlaps(range))
    }

    /// The span covering `pos`, if any.
    #[must_use]
    pub fn at(&self, pos: usize) -> Option<&Span<P>> {
        let idx = self.spans.partition_point(|s| s.range.end <= pos);
        self.spans.get(idx).filter(|s| s.contains(pos))
    }

    /// Insert a span, merging with touching spans whose payload merges.
    ///
    /// Spans whose payload does not merge are cut back wherever the new span
    /// overlaps them, so the set stays disjoint. Empty ranges are ignored.
    pub fn add(&mut self, range: TextRange, payload: P) {
        if range.is_empty() {
            return;
        }

        let mut merged = range;
        let mut kept = Vec::with_capacity(self.spans.len() + 2);
        for span in self.spans.drain(..) {
            if span.payload.merges_with(&payload) {
                if span.range.touches(merged) {
                    merged = merged.union(span.range);
                } else {
                    kept.push(span);
                }
            } else if span.range.overlaps(range) {
                if span.range.start < range.start {
                    let left = TextRange::from_ordered(span.range.start, range.start);
                    kept.push(Span::new(left, span.payload.clone()));
                }
                if span.range.end > range.end {
                    let right = TextRange::from_ordered(range.end, span.range.end);
                    kept.push(Span::new(right, span.payload));
                }
            } else {
                kept.push(span);
            }
        }

        let idx = kept.partition_point(|s| s.range.start < merged.start);
        kept.insert(idx, Span::new(merged, payload));
        self.spans = kept;
    }

    /// Remove a span by identity (same range and payload).
    ///
    /// Returns `false` when the span is not in the set.
    pub fn remove(&mut self, span: &Span<P>) -> bool {
        match self.spans.iter().position(|s| s == span) {
            Some(idx) => {
                self.spans.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Atomically remove `old` and add each of `replacements`.
    ///
    /// Nothing changes when `old` is not in the set.
    pub fn replace<I>(&mut self, old: &Span<P>, replacements: I) -> bool
    where
        I: IntoIterator<Item = Span<P>>,
    {
        if !self.remove(old) {
            return false;
        }
        for span in replacements {
            self.add(span.range, span.payload);
        }
        true
    }

    /// Add a span that starts at or after the end of the last span.
    ///
    /// Used when building a set left to right; falls back to [`add`](Self::add)
    /// when the span is out of order.
    pub(crate) fn push_back(&mut self, range: TextRange, payload: P) {
        if range.is_empty() {
            return;
        }
        let Some(last) = self.spans.last() else {
            self.spans.push(Span::new(range, payload));
            return;
        };
        if last.range.end > range.start {
            self.add(range, payload);
            return;
        }
        let extends = last.range.end == range.start && last.payload.merges_with(&payload);
        if !extends {
            self.spans.push(Span::new(range, payload));
        } else if let Some(last) = self.spans.last_mut() {
            last.range.end = range.end;
        }
    }

    /// Remove every span overlapping `range` and return them.
    pub(crate) fn take_overlapping(&mut self, range: TextRange) -> Vec<Span<P>> {
        let (taken, kept): (Vec<_>, Vec<_>) = self
            .spans
            .drain(..)
            .partition(|s| s.range.overlaps(range));
        self.spans = kept;
        taken
    }

    /// Keep ranges aligned with `n` chars inserted at `at`.
    ///
    /// Ranges with `start >= at` shift right by `n`; ranges ending at or
    /// before `at` stay put. A range strictly straddling `at` grows or is
    /// split depending on `mode`.
    pub fn apply_insert(&mut self, at: usize, n: usize, mode: InsertMode) {
        if n == 0 {
            return;
        }
        let mut adjusted = Vec::with_capacity(self.spans.len() + 1);
        for span in self.spans.drain(..) {
            let r = span.range;
            if r.start >= at {
                adjusted.push(Span::new(r.shifted(n), span.payload));
            } else if r.end <= at {
                adjusted.push(span);
            } else {
                match mode {
                    InsertMode::Extend => {
                        let grown = TextRange::from_ordered(r.start, r.end + n);
                        adjusted.push(Span::new(grown, span.payload));
                    }
                    InsertMode::Split => {
                        let left = TextRange::from_ordered(r.start, at);
                        let right = TextRange::from_ordered(at + n, r.end + n);
                        adjusted.push(Span::new(left, span.payload.clone()));
                        adjusted.push(Span::new(right, span.payload));
                    }
                }
            }
        }
        self.spans = adjusted;
    }

    /// Keep ranges aligned with the chars of `deleted` being removed.
    ///
    /// Overlapping ranges are truncated to the surviving text, ranges after
    /// the deletion shift left, and ranges left empty are dropped. Spans made
    /// adjacent by the deletion are merged.
    pub fn apply_delete(&mut self, deleted: TextRange) {
        if deleted.is_empty() {
            return;
        }
        let n = deleted.len();
        let map = |pos: usize| {
            if pos <= deleted.start {
                pos
            } else if pos >= deleted.end {
                pos - n
            } else {
                deleted.start
            }
        };

        let old = std::mem::take(&mut self.spans);
        for span in old {
            let range = TextRange::from_ordered(map(span.range.start), map(span.range.end));
            if range.is_empty() {
                continue;
            }
            if let Some(last) = self.spans.last_mut() {
                if last.range.end == range.start && last.payload.merges_with(&span.payload) {
                    last.range.end = range.end;
                    continue;
                }
            }
            self.spans.push(Span::new(range, span.payload));
        }
    }

    /// Check the set invariants: sorted, disjoint, non-empty spans, and no
    /// adjacent spans with merging payloads.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.spans.iter().all(|s| !s.range.is_empty())
            && self.spans.windows(2).all(|pair| {
                let (a, b) = (&pair[0], &pair[1]);
                a.range.end < b.range.start
                    || (a.range.end == b.range.start && !a.payload.merges_with(&b.payload))
            })
    }
}

impl<'a, P> IntoIterator for &'a RangeSet<P> {
    type Item = &'a Span<P>;
    type IntoIter = std::slice::Iter<'a, Span<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.iter()
    }
}
