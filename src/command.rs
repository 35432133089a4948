//! Editing commands as values.
//!
//! Hosts that drive a document from a menu, a key binding table or a bridge
//! message build a [`Command`] and hand it to
//! [`RichText::execute`](crate::RichText::execute).

use crate::range::Selection;
use crate::style::StyleKind;

/// One editing operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Toggle a style over the current selection.
    Toggle(StyleKind),
    /// Link `start..end` to `href`.
    EmbedLink {
        start: usize,
        end: usize,
        href: String,
    },
    /// Remove the link containing `position`.
    RemoveLink { position: usize },
    /// Decode `markup` and insert it at `at`.
    InsertText { markup: String, at: usize },
    /// Replace the held selection.
    SetSelection(Selection),
}

impl Command {
    /// Build the toggle command for a format menu label.
    ///
    /// Labels match [`StyleKind::label`]; anything else yields `None`.
    #[must_use]
    pub fn from_menu_label(label: &str) -> Option<Self> {
        StyleKind::ALL
            .into_iter()
            .find(|kind| kind.label() == label)
            .map(Self::Toggle)
    }
}
