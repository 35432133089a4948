//! Change notifications.
//!
//! A [`RichText`](crate::RichText) reports every successful mutation to the
//! callback registered on that document. There is no process-wide state:
//! two documents never see each other's events.

use crate::range::{Selection, TextRange};
use crate::style::StyleKind;

/// A mutation that has just been applied to a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChangeEvent {
    /// Text was inserted or removed.
    TextChanged {
        /// The span of text affected, in post-edit offsets.
        range: TextRange,
        /// Document length after the edit, in chars.
        len: usize,
    },
    /// A style was toggled over a selection.
    StyleToggled {
        kind: StyleKind,
        selection: Selection,
        enabled: bool,
    },
    /// A link was embedded.
    LinkEmbedded { range: TextRange, href: String },
    /// Links containing `position` were removed.
    LinkRemoved { position: usize, count: usize },
}

impl ChangeEvent {
    /// Short name of the event kind, for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TextChanged { .. } => "text_changed",
            Self::StyleToggled { .. } => "style_toggled",
            Self::LinkEmbedded { .. } => "link_embedded",
            Self::LinkRemoved { .. } => "link_removed",
        }
    }
}

/// A per-document change listener.
pub type ChangeCallback = Box<dyn Fn(&ChangeEvent) + Send + Sync + 'static>;
