//! Inline style kinds and their per-kind range sets.
//!
//! This module provides the types that describe *which* formatting applies
//! where:
//!
//! - [`StyleKind`]: the four toggleable inline styles, in canonical order
//! - [`TextAttributes`]: bitflags summarizing the styles active at a point
//! - [`StyleSets`]: one [`RangeSet`] per style kind
//!
//! # Examples
//!
//! ```
//! use richtext::{StyleKind, StyleSets, TextAttributes, TextRange};
//!
//! let mut styles = StyleSets::new();
//! styles.get_mut(StyleKind::Bold).add(TextRange::new(0, 5).unwrap(), ());
//! styles.get_mut(StyleKind::Underline).add(TextRange::new(3, 8).unwrap(), ());
//!
//! assert_eq!(styles.attributes_at(4), TextAttributes::BOLD | TextAttributes::UNDERLINE);
//! assert_eq!(styles.attributes_at(6), TextAttributes::UNDERLINE);
//! ```

use bitflags::bitflags;

use crate::spans::RangeSet;

bitflags! {
    /// Inline styles active at a position.
    ///
    /// Flags are combined with bitwise OR; the link target is tracked
    /// separately by [`LinkTable`](crate::LinkTable).
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TextAttributes: u8 {
        /// Bold weight.
        const BOLD          = 0x01;
        /// Italic slant.
        const ITALIC        = 0x02;
        /// Line through the text.
        const STRIKETHROUGH = 0x04;
        /// Line under the text.
        const UNDERLINE     = 0x08;
    }
}

impl TextAttributes {
    /// Style kinds set in these flags, in canonical order.
    pub fn kinds(self) -> impl Iterator<Item = StyleKind> {
        StyleKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(kind.flag()))
    }
}

/// A toggleable inline style.
///
/// Variant order is the canonical nesting order used when serializing:
/// bold wraps italic, which wraps strikethrough, which wraps underline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleKind {
    Bold,
    Italic,
    Strikethrough,
    Underline,
}

impl StyleKind {
    /// Every kind, in canonical order.
    pub const ALL: [Self; 4] = [Self::Bold, Self::Italic, Self::Strikethrough, Self::Underline];

    /// The attribute flag for this kind.
    #[must_use]
    pub const fn flag(self) -> TextAttributes {
        match self {
            Self::Bold => TextAttributes::BOLD,
            Self::Italic => TextAttributes::ITALIC,
            Self::Strikethrough => TextAttributes::STRIKETHROUGH,
            Self::Underline => TextAttributes::UNDERLINE,
        }
    }

    /// Element name written when serializing to HTML.
    ///
    /// Strikethrough may also be written as `strike`; see
    /// [`StrikeTag`](crate::StrikeTag).
    #[must_use]
    pub const fn html_tag(self) -> &'static str {
        match self {
            Self::Bold => "b",
            Self::Italic => "i",
            Self::Strikethrough => "s",
            Self::Underline => "u",
        }
    }

    /// Label shown in format menus.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::Strikethrough => "Strikethrough",
            Self::Underline => "Underline",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// One presence-only [`RangeSet`] per [`StyleKind`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleSets {
    sets: [RangeSet<()>; 4],
}

impl StyleSets {
    /// Create empty sets for every kind.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The ranges for one kind.
    #[must_use]
    pub fn get(&self, kind: StyleKind) -> &RangeSet<()> {
        &self.sets[kind.index()]
    }

    /// Mutable access to the ranges for one kind.
    pub fn get_mut(&mut self, kind: StyleKind) -> &mut RangeSet<()> {
        &mut self.sets[kind.index()]
    }

    /// Iterate over `(kind, ranges)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleKind, &RangeSet<()>)> {
        StyleKind::ALL.into_iter().zip(self.sets.iter())
    }

    /// Apply `f` to every kind's set.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut RangeSet<()>)) {
        for set in &mut self.sets {
            f(set);
        }
    }

    /// Styles active at `pos`.
    #[must_use]
    pub fn attributes_at(&self, pos: usize) -> TextAttributes {
        self.iter()
            .filter(|(_, set)| set.at(pos).is_some())
            .fold(TextAttributes::empty(), |acc, (kind, _)| acc | kind.flag())
    }

    /// Check if no kind has any range.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.iter().all(RangeSet::is_empty)
    }

    /// Check every kind's set invariants.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.sets.iter().all(RangeSet::is_normalized)
    }
}
