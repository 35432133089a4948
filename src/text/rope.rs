//! Rope wrapper using the ropey crate.

use ropey::{Rope, RopeSlice};

/// Wrapper around `ropey::Rope` addressed purely by char index.
#[derive(Clone, Debug, Default)]
pub struct RopeWrapper {
    rope: Rope,
}

impl RopeWrapper {
    /// Create a rope from a string.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
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
        self.rope.len_bytes() == 0
    }

    /// Get a slice of the rope, or an empty slice if the range is invalid.
    #[must_use]
    pub fn slice<R>(&self, range: R) -> RopeSlice<'_>
    where
        R: std::ops::RangeBounds<usize>,
    {
        self.rope
            .get_slice(range)
            .unwrap_or_else(|| self.rope.slice(..0))
    }

    /// Insert text at a character position.
    ///
    /// Positions past the end are ignored; callers validate first.
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        if char_idx <= self.len_chars() {
            self.rope.insert(char_idx, text);
        }
    }

    /// Remove a range of characters.
    pub fn remove(&mut self, range: std::ops::Range<usize>) {
        if range.start <= range.end && range.end <= self.len_chars() {
            self.rope.remove(range);
        }
    }

    /// Convert to string.
    #[must_use]
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rope_counts_chars_not_bytes() {
        let rope = RopeWrapper::from_str("héllo");
        assert_eq!(rope.len_chars(), 5);
        assert_eq!(rope.slice(1..2).to_string(), "é");
        assert!(!rope.is_empty());
        assert!(RopeWrapper::default().is_empty());
    }

    #[test]
    fn test_rope_insert() {
        let mut rope = RopeWrapper::from_str("Hello!");
        rope.insert(5, ", world");
        assert_eq!(rope.to_string(), "Hello, world!");
    }

    #[test]
    fn test_rope_insert_past_end_is_ignored() {
        let mut rope = RopeWrapper::from_str("abc");
        rope.insert(9, "x");
        assert_eq!(rope.to_string(), "abc");
    }

    #[test]
    fn test_rope_remove() {
        let mut rope = RopeWrapper::from_str("Hello, world!");
        rope.remove(5..12);
        assert_eq!(rope.to_string(), "Hello!");
    }

    #[test]
    fn test_rope_slice_out_of_range_is_empty() {
        let rope = RopeWrapper::from_str("abc");
        assert_eq!(rope.slice(1..3).to_string(), "bc");
        assert_eq!(rope.slice(2..9).len_chars(), 0);
    }
}
