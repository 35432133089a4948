//! Serialization of formatted text to the HTML subset.

use crate::html::entities::{push_attr, push_text_char};
use crate::html::{EncodeOptions, LineBreaks, StrikeTag};
use crate::link::LinkTable;
use crate::range::TextRange;
use crate::runs::format_runs;
use crate::style::{StyleKind, StyleSets};
use crate::text::TextBuffer;

/// An inline element in canonical nesting order: the link outermost, then
/// styles in [`StyleKind`] order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tag<'a> {
    Link(&'a str),
    Style(StyleKind),
}

/// Writes tags lazily so identical neighbors share one open element.
struct HtmlWriter<'a> {
    out: String,
    open: Vec<Tag<'a>>,
    options: &'a EncodeOptions,
}

impl<'a> HtmlWriter<'a> {
    fn new(options: &'a EncodeOptions, capacity: usize) -> Self {
        Self {
            out: String::with_capacity(capacity),
            open: Vec::new(),
            options,
        }
    }

    fn tag_name(&self, tag: Tag<'_>) -> &'static str {
        match tag {
            Tag::Link(_) => "a",
            Tag::Style(StyleKind::Strikethrough) if self.options.strike_tag == StrikeTag::Strike => {
                "strike"
            }
            Tag::Style(kind) => kind.html_tag(),
        }
    }

    fn open_tag(&mut self, tag: Tag<'a>) {
        match tag {
            Tag::Link(href) => {
                self.out.push_str("<a href=\"");
                push_attr(&mut self.out, href);
                self.out.push_str("\">");
            }
            Tag::Style(_) => {
                let name = self.tag_name(tag);
                self.out.push('<');
                self.out.push_str(name);
                self.out.push('>');
            }
        }
        self.open.push(tag);
    }

    fn close_to(&mut self, depth: usize) {
        while self.open.len() > depth {
            if let Some(tag) = self.open.pop() {
                let name = self.tag_name(tag);
                self.out.push_str("</");
                self.out.push_str(name);
                self.out.push('>');
            }
        }
    }

    /// Make the open element stack equal `desired`, keeping the longest
    /// shared prefix open.
    fn transition(&mut self, desired: &[Tag<'a>]) {
        let shared = self
            .open
            .iter()
            .zip(desired)
            .take_while(|(a, b)| a == b)
            .count();
        self.close_to(shared);
        for &tag in &desired[shared..] {
            self.open_tag(tag);
        }
    }

    fn push_char(&mut self, ch: char, desired: &[Tag<'a>]) {
        if ch == '\n' {
            match self.options.line_breaks {
                LineBreaks::Br => {
                    self.transition(desired);
                    self.out.push_str("<br>");
                }
                LineBreaks::Paragraphs => {
                    self.close_to(0);
                    self.out.push_str("</p><p>");
                }
            }
        } else {
            self.transition(desired);
            push_text_char(&mut self.out, ch);
        }
    }

    fn finish(mut self) -> String {
        self.close_to(0);
        self.out
    }
}

/// Serialize `buffer` with its formatting.
///
/// Each maximal run of identical formatting is emitted once; neighboring
/// runs that share outer elements keep them open.
#[must_use]
pub fn encode_with(
    buffer: &TextBuffer,
    styles: &StyleSets,
    links: &LinkTable,
    options: &EncodeOptions,
) -> String {
    let len = buffer.len_chars();
    let mut writer = HtmlWriter::new(options, len + len / 2);
    if len == 0 {
        return writer.finish();
    }

    let paragraphs = options.line_breaks == LineBreaks::Paragraphs;
    if paragraphs {
        writer.out.push_str("<p>");
    }

    let mut desired: Vec<Tag<'_>> = Vec::with_capacity(StyleKind::ALL.len() + 1);
    for run in format_runs(styles, links, TextRange::from_ordered(0, len)) {
        desired.clear();
        desired.extend(run.href.map(Tag::Link));
        desired.extend(run.attributes.kinds().map(Tag::Style));
        for ch in buffer.chars(run.range) {
            writer.push_char(ch, &desired);
        }
    }

    let mut html = writer.finish();
    if paragraphs {
        html.push_str("</p>");
    }
    html
}
