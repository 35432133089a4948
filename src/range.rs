//! Half-open offset ranges and the caller-held selection.
//!
//! All offsets are char (Unicode scalar value) indices into a
//! [`TextBuffer`](crate::TextBuffer), 0-based with an exclusive end.

use crate::error::{Error, Result};

/// A half-open interval `[start, end)` over a text buffer.
///
/// A zero-length range denotes an insertion point and never carries an
/// attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextRange {
    /// First offset covered by the range.
    pub start: usize,
    /// Offset one past the last covered char.
    pub end: usize,
}

impl TextRange {
    /// Create a range, failing when `start > end`.
    pub const fn new(start: usize, end: usize) -> Result<Self> {
        if start > end {
            // The buffer length is unknown at this level.
            return Err(Error::invalid_range(start, end, end));
        }
        Ok(Self { start, end })
    }

    /// Create a range that must also fit inside a buffer of `len` chars.
    pub const fn checked(start: usize, end: usize, len: usize) -> Result<Self> {
        if start > end || end > len {
            return Err(Error::invalid_range(start, end, len));
        }
        Ok(Self { start, end })
    }

    /// Build a range from endpoints the caller already knows are ordered.
    #[must_use]
    pub(crate) const fn from_ordered(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Number of chars covered.
    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// Check if this is an insertion point.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Check if `pos` lies inside the range.
    #[must_use]
    pub const fn contains(self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Check if the two ranges share at least one char.
    ///
    /// An insertion point overlaps nothing.
    #[must_use]
    pub const fn overlaps(self, other: Self) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }

    /// Check if the ranges overlap or sit directly next to each other.
    #[must_use]
    pub const fn touches(self, other: Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Smallest range covering both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Shift both endpoints right by `delta`.
    #[must_use]
    pub const fn shifted(self, delta: usize) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }
}

impl From<TextRange> for std::ops::Range<usize> {
    fn from(range: TextRange) -> Self {
        range.start..range.end
    }
}

/// The caller's current selection.
///
/// There is only ever one selection per document; a zero-width selection is
/// a caret.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Create a selection, swapping reversed endpoints.
    #[must_use]
    pub const fn new(anchor: usize, head: usize) -> Self {
        if anchor <= head {
            Self {
                start: anchor,
                end: head,
            }
        } else {
            Self {
                start: head,
                end: anchor,
            }
        }
    }

    /// A caret at `pos`.
    #[must_use]
    pub const fn caret(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Check if this is a caret.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Number of selected chars.
    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// The selected range.
    #[must_use]
    pub const fn range(self) -> TextRange {
        TextRange {
            start: self.start,
            end: self.end,
        }
    }
}

impl From<TextRange> for Selection {
    fn from(range: TextRange) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}
