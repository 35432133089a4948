//! Plain text storage for a rich-text document.
//!
//! [`TextBuffer`] only knows about characters. Formatting lives beside it in
//! [`StyleSets`](crate::StyleSets) and [`LinkTable`](crate::LinkTable), which
//! the owning [`RichText`](crate::RichText) keeps in step with every edit.

use crate::error::{Error, Result};
use crate::range::TextRange;
use crate::text::rope::RopeWrapper;

/// Rope-backed text buffer with char-offset addressing.
///
/// `TextBuffer` uses a rope internally for O(log n) insertions and
/// deletions. Every offset is a char index; [`len_chars`](Self::len_chars)
/// is the sole bound for validity.
#[derive(Clone, Debug, Default)]
pub struct TextBuffer {
    rope: RopeWrapper,
    revision: u64,
}

impl TextBuffer {
    /// Create an empty text buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer with initial text.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            rope: RopeWrapper::from_str(text),
            revision: 0,
        }
    }

    /// Get the number of characters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.is_empty()
    }

    /// Get the buffer revision (increments on content changes).
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Validate a range against the current length.
    pub fn check_range(&self, start: usize, end: usize) -> Result<TextRange> {
        TextRange::checked(start, end, self.len_chars())
    }

    /// Copy out the text of a range.
    pub fn slice(&self, range: TextRange) -> Result<String> {
        let range = self.check_range(range.start, range.end)?;
        Ok(self.rope.slice(range.start..range.end).to_string())
    }

    /// Iterate over the chars of a range. Invalid ranges yield nothing.
    pub fn chars(&self, range: TextRange) -> impl Iterator<Item = char> + '_ {
        self.rope.slice(range.start..range.end).chars()
    }

    /// Insert text at a char offset.
    ///
    /// Returns the number of chars inserted.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<usize> {
        let len = self.len_chars();
        if offset > len {
            return Err(Error::invalid_range(offset, offset, len));
        }
        let inserted = text.chars().count();
        if inserted > 0 {
            self.rope.insert(offset, text);
            self.bump_revision();
        }
        Ok(inserted)
    }

    /// Remove a range of chars.
    pub fn remove(&mut self, range: TextRange) -> Result<()> {
        let range = self.check_range(range.start, range.end)?;
        if !range.is_empty() {
            self.rope.remove(range.into());
            self.bump_revision();
        }
        Ok(())
    }

    /// Convert to plain string.
    #[must_use]
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl PartialEq for TextBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.rope.slice(..) == other.rope.slice(..)
    }
}

impl Eq for TextBuffer {}
