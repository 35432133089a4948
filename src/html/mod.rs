//! Conversion between formatted text and a small HTML subset.
//!
//! Encoding emits `<b>`, `<i>`, `<s>` (or `<strike>`), `<u>` and
//! `<a href="...">` with the link outermost and styles nested in
//! [`StyleKind`](crate::StyleKind) order. Decoding is lenient: it accepts the
//! markup platform HTML writers produce, ignores what it does not understand,
//! and never fails.
//!
//! # Examples
//!
//! ```
//! use richtext::html;
//!
//! let fragment = html::decode("<p>Hello <b>world</b></p>");
//! assert_eq!(fragment.text, "Hello world");
//! assert_eq!(
//!     html::encode_fragment(&fragment, &html::EncodeOptions::default()),
//!     "Hello <b>world</b>"
//! );
//! ```

mod decode;
mod encode;
mod entities;

pub use decode::decode;
pub use encode::encode_with;

use crate::link::LinkTable;
use crate::range::TextRange;
use crate::style::StyleSets;
use crate::text::TextBuffer;

/// Which element strikethrough text is written as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StrikeTag {
    /// `<s>`
    #[default]
    S,
    /// `<strike>`, as older platform writers emit.
    Strike,
}

/// How `'\n'` in the text is written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineBreaks {
    /// Each newline becomes `<br>`.
    #[default]
    Br,
    /// The text is wrapped in `<p>` elements split at each newline.
    ///
    /// Formatting on the newline chars themselves is not preserved.
    Paragraphs,
}

/// Options for [`encode_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EncodeOptions {
    pub strike_tag: StrikeTag,
    pub line_breaks: LineBreaks,
}

/// Serialize with [`EncodeOptions::default`].
#[must_use]
pub fn encode(buffer: &TextBuffer, styles: &StyleSets, links: &LinkTable) -> String {
    encode_with(buffer, styles, links, &EncodeOptions::default())
}

/// Serialize a decoded fragment.
#[must_use]
pub fn encode_fragment(fragment: &Fragment, options: &EncodeOptions) -> String {
    let buffer = TextBuffer::with_text(&fragment.text);
    encode_with(&buffer, &fragment.styles, &fragment.links, options)
}

/// Decoded text with its ranges, offsets relative to the fragment start.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub styles: StyleSets,
    pub links: LinkTable,
}

impl Fragment {
    /// Length of the text in chars.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the fragment has no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Drop trailing whitespace, clipping ranges to the remaining text.
    pub fn trim_end(&mut self) {
        let kept_bytes = self.text.trim_end().len();
        if kept_bytes == self.text.len() {
            return;
        }
        let kept = self.text[..kept_bytes].chars().count();
        let dropped = TextRange::from_ordered(kept, self.len_chars());
        self.styles.for_each_mut(|set| set.apply_delete(dropped));
        self.links.ranges_mut().apply_delete(dropped);
        self.text.truncate(kept_bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleKind;

    #[test]
    fn test_default_options() {
        let options = EncodeOptions::default();
        assert_eq!(options.strike_tag, StrikeTag::S);
        assert_eq!(options.line_breaks, LineBreaks::Br);
    }

    #[test]
    fn test_trim_end_clips_ranges() {
        let mut fragment = decode("<b>hi  </b><br><br>");
        assert_eq!(fragment.text, "hi  \n\n");
        fragment.trim_end();
        assert_eq!(fragment.text, "hi");
        assert_eq!(fragment.len_chars(), 2);
        let bold: Vec<_> = fragment.styles.get(StyleKind::Bold).iter().map(|s| s.range).collect();
        assert_eq!(bold, vec![TextRange::new(0, 2).unwrap()]);
    }

    #[test]
    fn test_trim_end_drops_whitespace_only_ranges() {
        let mut fragment = decode(r#"x<a href="l"> </a>"#);
        fragment.trim_end();
        assert_eq!(fragment.text, "x");
        assert!(fragment.links.is_empty());
    }

    #[test]
    fn test_round_trip_br_mode() {
        let html = r#"a<b>b<i>c</i></b><br><a href="u"><u>d</u></a>"#;
        let fragment = decode(html);
        assert_eq!(encode_fragment(&fragment, &EncodeOptions::default()), html);
    }

    #[test]
    fn test_round_trip_paragraph_mode() {
        let options = EncodeOptions {
            strike_tag: StrikeTag::Strike,
            line_breaks: LineBreaks::Paragraphs,
        };
        let html = "<p><strike>one</strike></p><p></p><p>two</p>";
        let fragment = decode(html);
        assert_eq!(fragment.text, "one\n\ntwo");
        assert_eq!(encode_fragment(&fragment, &options), html);
    }
}
