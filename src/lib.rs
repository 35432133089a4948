//! `richtext` - inline rich-text formatting engine
//!
//! Keeps bold, italic, strikethrough and underline styles plus hyperlinks as
//! disjoint ranges beside a rope-backed text buffer, toggles styles over a
//! selection, and converts to and from a small HTML subset.
//!
//! # Examples
//!
//! ```
//! use richtext::{RichText, Selection, StyleKind};
//!
//! let mut doc = RichText::from_html("<p>make <b>this</b> bold</p>");
//! doc.toggle_range(StyleKind::Bold, Selection::new(10, 14)).unwrap();
//! assert_eq!(doc.to_html(), "make <b>this</b> <b>bold</b>");
//! ```

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)] // Allow StyleKind in style etc
#![allow(clippy::missing_errors_doc)] // Every error is Error::InvalidRange or OverlappingLink
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::inherent_to_string)] // to_string methods are convenient
#![allow(clippy::should_implement_trait)] // from_str naming is intentional
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::needless_collect)] // Collect for assertions is clear

pub mod command;
pub mod document;
pub mod error;
pub mod event;
pub mod html;
pub mod link;
pub mod range;
pub mod runs;
pub mod spans;
pub mod style;
pub mod text;
pub mod toggle;

// Re-export core types at crate root
pub use command::Command;
pub use document::RichText;
pub use error::{Error, Result};
pub use event::{ChangeCallback, ChangeEvent};
pub use link::LinkTable;
pub use range::{Selection, TextRange};
pub use runs::{FormatRun, format_runs};
pub use spans::{InsertMode, RangeSet, Span, SpanPayload};
pub use style::{StyleKind, StyleSets, TextAttributes};
pub use text::TextBuffer;
pub use toggle::{ToggleOutcome, toggle};

// Re-export codec types
pub use html::{EncodeOptions, Fragment, LineBreaks, StrikeTag};
