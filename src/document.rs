//! The editable rich-text document.
//!
//! [`RichText`] ties a [`TextBuffer`] to its [`StyleSets`] and [`LinkTable`]
//! and keeps them aligned across every edit. All offsets are char indices.
//!
//! # Examples
//!
//! ```
//! use richtext::{RichText, Selection, StyleKind};
//!
//! let mut doc = RichText::with_text("Hello world");
//! doc.set_selection(Selection::new(6, 11)).unwrap();
//! doc.toggle(StyleKind::Bold).unwrap();
//! doc.embed_link(0, 5, "https://example.com").unwrap();
//!
//! assert_eq!(
//!     doc.to_html(),
//!     r#"<a href="https://example.com">Hello</a> <b>world</b>"#
//! );
//! ```

use std::fmt;

use tracing::debug;

use crate::command::Command;
use crate::error::{Error, Result};
use crate::event::{ChangeCallback, ChangeEvent};
use crate::html::{self, EncodeOptions};
use crate::link::LinkTable;
use crate::range::{Selection, TextRange};
use crate::runs::{FormatRun, format_runs};
use crate::spans::InsertMode;
use crate::style::{StyleKind, StyleSets, TextAttributes};
use crate::text::TextBuffer;
use crate::toggle::{ToggleOutcome, toggle};

/// Text with inline styles, hyperlinks and a held selection.
#[derive(Default)]
pub struct RichText {
    buffer: TextBuffer,
    styles: StyleSets,
    links: LinkTable,
    selection: Selection,
    on_change: Option<ChangeCallback>,
}

impl fmt::Debug for RichText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RichText")
            .field("text", &self.buffer.to_string())
            .field("styles", &self.styles)
            .field("links", &self.links)
            .field("selection", &self.selection)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl RichText {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unformatted document.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: TextBuffer::with_text(text),
            ..Self::default()
        }
    }

    /// Create a document from markup.
    ///
    /// Decoding is lenient and never fails; see [`html::decode`].
    #[must_use]
    pub fn from_html(markup: &str) -> Self {
        let fragment = html::decode(markup);
        Self {
            buffer: TextBuffer::with_text(&fragment.text),
            styles: fragment.styles,
            links: fragment.links,
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The plain text.
    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    #[must_use]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn styles(&self) -> &StyleSets {
        &self.styles
    }

    #[must_use]
    pub fn links(&self) -> &LinkTable {
        &self.links
    }

    /// Length in chars.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The held selection.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Replace the held selection.
    pub fn set_selection(&mut self, selection: Selection) -> Result<()> {
        self.buffer.check_range(selection.start, selection.end)?;
        self.selection = selection;
        Ok(())
    }

    /// Styles active at `pos`.
    #[must_use]
    pub fn attributes_at(&self, pos: usize) -> TextAttributes {
        self.styles.attributes_at(pos)
    }

    /// Formatting runs covering the whole document.
    #[must_use]
    pub fn runs(&self) -> Vec<FormatRun<'_>> {
        let all = TextRange::from_ordered(0, self.len_chars());
        format_runs(&self.styles, &self.links, all)
    }

    /// Formatting runs covering `start..end`.
    pub fn runs_in(&self, start: usize, end: usize) -> Result<Vec<FormatRun<'_>>> {
        let range = self.buffer.check_range(start, end)?;
        Ok(format_runs(&self.styles, &self.links, range))
    }

    // ------------------------------------------------------------------
    // Styles
    // ------------------------------------------------------------------

    /// Toggle `kind` over the held selection.
    pub fn toggle(&mut self, kind: StyleKind) -> Result<ToggleOutcome> {
        self.toggle_range(kind, self.selection)
    }

    /// Toggle `kind` over `selection`.
    ///
    /// A caret selection changes nothing and reports
    /// [`ToggleOutcome::Ignored`].
    pub fn toggle_range(&mut self, kind: StyleKind, selection: Selection) -> Result<ToggleOutcome> {
        self.buffer.check_range(selection.start, selection.end)?;
        let outcome = toggle(self.styles.get_mut(kind), selection, ());
        if outcome != ToggleOutcome::Ignored {
            debug!(style = kind.label(), ?outcome, "toggled style");
            self.emit(&ChangeEvent::StyleToggled {
                kind,
                selection,
                enabled: outcome.is_enabled(),
            });
        }
        Ok(outcome)
    }

    // ------------------------------------------------------------------
    // Links
    // ------------------------------------------------------------------

    /// Link `start..end` to `href`.
    ///
    /// Fails with [`Error::OverlappingLink`] when any char in the range
    /// already belongs to a link. A zero-width range is accepted and ignored.
    pub fn embed_link(&mut self, start: usize, end: usize, href: &str) -> Result<()> {
        let range = self.buffer.check_range(start, end)?;
        self.links.embed(range, href)?;
        if !range.is_empty() {
            self.emit(&ChangeEvent::LinkEmbedded {
                range,
                href: href.to_owned(),
            });
        }
        Ok(())
    }

    /// Remove the link containing `pos`.
    ///
    /// Returns the number of links removed, zero when `pos` is not inside a
    /// link.
    pub fn remove_link(&mut self, pos: usize) -> Result<usize> {
        let len = self.len_chars();
        if pos > len {
            return Err(Error::invalid_range(pos, pos, len));
        }
        let count = self.links.remove_at(pos);
        if count > 0 {
            self.emit(&ChangeEvent::LinkRemoved {
                position: pos,
                count,
            });
        }
        Ok(count)
    }

    /// The href of the link containing `pos`.
    #[must_use]
    pub fn link_at(&self, pos: usize) -> Option<&str> {
        self.links.lookup_at(pos)
    }

    // ------------------------------------------------------------------
    // Text edits
    // ------------------------------------------------------------------

    /// Insert plain text at `at`.
    ///
    /// Text typed strictly inside a styled or linked range joins it; text at
    /// a range boundary stays plain. Returns the number of chars inserted.
    pub fn insert(&mut self, at: usize, text: &str) -> Result<usize> {
        let n = self.buffer.insert(at, text)?;
        if n == 0 {
            return Ok(0);
        }
        self.styles
            .for_each_mut(|set| set.apply_insert(at, n, InsertMode::Extend));
        self.links
            .ranges_mut()
            .apply_insert(at, n, InsertMode::Extend);
        self.after_insert(at, n);
        Ok(n)
    }

    /// Remove `start..end`.
    ///
    /// Ranges are truncated to the surviving text and ranges left empty are
    /// dropped.
    pub fn delete(&mut self, start: usize, end: usize) -> Result<()> {
        let range = self.buffer.check_range(start, end)?;
        if range.is_empty() {
            return Ok(());
        }
        self.buffer.remove(range)?;
        self.styles.for_each_mut(|set| set.apply_delete(range));
        self.links.ranges_mut().apply_delete(range);

        let map = |pos: usize| {
            if pos <= range.start {
                pos
            } else if pos >= range.end {
                pos - range.len()
            } else {
                range.start
            }
        };
        self.selection = Selection::new(map(self.selection.start), map(self.selection.end));
        self.emit(&ChangeEvent::TextChanged {
            range: TextRange::from_ordered(range.start, range.start),
            len: self.len_chars(),
        });
        Ok(())
    }

    /// Decode `markup` and splice it in at `at`.
    ///
    /// Trailing whitespace of the decoded fragment is dropped. Existing
    /// ranges straddling `at` are split around the new text, which carries
    /// only the fragment's own formatting; fragment ranges that touch
    /// equal neighbors merge with them. Returns the number of chars inserted.
    pub fn insert_markup(&mut self, markup: &str, at: usize) -> Result<usize> {
        let len = self.len_chars();
        if at > len {
            return Err(Error::invalid_range(at, at, len));
        }

        let mut fragment = html::decode(markup);
        fragment.trim_end();
        let n = fragment.len_chars();
        if n == 0 {
            return Ok(0);
        }

        self.buffer.insert(at, &fragment.text)?;
        for kind in StyleKind::ALL {
            let set = self.styles.get_mut(kind);
            set.apply_insert(at, n, InsertMode::Split);
            for span in fragment.styles.get(kind) {
                set.add(span.range.shifted(at), ());
            }
        }
        let links = self.links.ranges_mut();
        links.apply_insert(at, n, InsertMode::Split);
        for span in fragment.links.spans() {
            links.add(span.range.shifted(at), span.payload.clone());
        }

        debug!(at, chars = n, "inserted markup");
        self.after_insert(at, n);
        Ok(n)
    }

    fn after_insert(&mut self, at: usize, n: usize) {
        let map = |pos: usize| if pos >= at { pos + n } else { pos };
        self.selection = Selection::new(map(self.selection.start), map(self.selection.end));
        self.emit(&ChangeEvent::TextChanged {
            range: TextRange::from_ordered(at, at + n),
            len: self.len_chars(),
        });
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    /// Serialize to markup with default options.
    #[must_use]
    pub fn to_html(&self) -> String {
        html::encode(&self.buffer, &self.styles, &self.links)
    }

    /// Serialize to markup.
    #[must_use]
    pub fn to_html_with(&self, options: &EncodeOptions) -> String {
        html::encode_with(&self.buffer, &self.styles, &self.links, options)
    }

    // ------------------------------------------------------------------
    // Commands and notifications
    // ------------------------------------------------------------------

    /// Run one command.
    pub fn execute(&mut self, command: Command) -> Result<()> {
        debug!(?command, "execute");
        match command {
            Command::Toggle(kind) => self.toggle(kind).map(drop),
            Command::EmbedLink { start, end, href } => self.embed_link(start, end, &href),
            Command::RemoveLink { position } => self.remove_link(position).map(drop),
            Command::InsertText { markup, at } => self.insert_markup(&markup, at).map(drop),
            Command::SetSelection(selection) => self.set_selection(selection),
        }
    }

    /// Register the listener notified after every change.
    ///
    /// Replaces any previous listener.
    pub fn set_change_callback<F>(&mut self, callback: F)
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.on_change = Some(Box::new(callback));
    }

    pub fn clear_change_callback(&mut self) {
        self.on_change = None;
    }

    fn emit(&self, event: &ChangeEvent) {
        debug!(event = event.name(), revision = self.buffer.revision(), "change");
        if let Some(callback) = &self.on_change {
            callback(event);
        }
    }
}
