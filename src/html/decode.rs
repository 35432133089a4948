//! Lenient parsing of the HTML subset.
//!
//! The decoder never fails. Recognized inline elements become ranges in the
//! output's char-offset space; unknown elements are dropped while their text
//! is kept; comments, doctypes and the content of non-visible elements
//! (`head`, `style`, `script`, `title`) are skipped entirely.

use tracing::trace;

use crate::html::Fragment;
use crate::html::entities::unescape;
use crate::range::TextRange;
use crate::style::StyleKind;

/// Elements whose content is not visible text.
const SKIPPED_ELEMENTS: [&str; 4] = ["head", "script", "style", "title"];

/// A parsed start or end tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct RawTag {
    /// Lowercased element name.
    name: String,
    closing: bool,
    self_closing: bool,
    href: Option<String>,
}

/// What a tag means to the decoder.
enum Element {
    Style(StyleKind),
    Link,
    LineBreak,
    Block,
    Skipped,
    Unknown,
}

fn classify(name: &str) -> Element {
    match name {
        "b" | "strong" => Element::Style(StyleKind::Bold),
        "i" | "em" => Element::Style(StyleKind::Italic),
        "s" | "strike" | "del" => Element::Style(StyleKind::Strikethrough),
        "u" => Element::Style(StyleKind::Underline),
        "a" => Element::Link,
        "br" => Element::LineBreak,
        "p" | "div" => Element::Block,
        _ if SKIPPED_ELEMENTS.contains(&name) => Element::Skipped,
        _ => Element::Unknown,
    }
}

/// Builds a [`Fragment`] from a stream of text and tags.
#[derive(Default)]
struct Decoder {
    fragment: Fragment,
    /// Length of `fragment.text` in chars.
    len: usize,
    /// Open element count per style kind, in [`StyleKind::ALL`] order.
    depth: [u32; 4],
    /// Open `<a>` elements; `None` for anchors without an href.
    links: Vec<Option<String>>,
    /// A block element has been opened before.
    seen_block: bool,
    /// A block element was closed and no line break followed yet.
    pending_break: bool,
    /// A block element was opened and nothing followed yet.
    block_just_opened: bool,
    /// Whitespace-only text, held back until we know no block follows it.
    pending_space: String,
}

impl Decoder {
    fn push_chars(&mut self, text: &str) {
        let n = text.chars().count();
        if n == 0 {
            return;
        }
        let range = TextRange::from_ordered(self.len, self.len + n);
        self.fragment.text.push_str(text);
        self.len += n;
        self.block_just_opened = false;

        for (kind, depth) in StyleKind::ALL.into_iter().zip(self.depth) {
            if depth > 0 {
                self.fragment.styles.get_mut(kind).push_back(range, ());
            }
        }
        // The innermost anchor with an href wins.
        if let Some(href) = self.links.iter().rev().flatten().next() {
            let href = href.clone();
            self.fragment.links.ranges_mut().push_back(range, href);
        }
    }

    fn flush_pending_break(&mut self) {
        if self.pending_break {
            self.pending_break = false;
            self.push_plain_break();
        }
    }

    fn flush_space(&mut self) {
        if !self.pending_space.is_empty() {
            let space = std::mem::take(&mut self.pending_space);
            self.push_chars(&space);
        }
    }

    /// A paragraph separator carries no formatting.
    fn push_plain_break(&mut self) {
        self.fragment.text.push('\n');
        self.len += 1;
    }

    fn text(&mut self, raw: &str) {
        // Raw line breaks in markup are insignificant. `<br>`, blocks and
        // character references make them.
        let stripped = raw.replace(['\n', '\r'], "");
        if stripped.is_empty() {
            return;
        }
        // Indentation after a closed block or before an opening one.
        if stripped.bytes().all(|b| b.is_ascii_whitespace()) {
            if !self.pending_break {
                self.pending_space.push_str(&stripped);
            }
            return;
        }
        self.flush_space();
        let visible = unescape(&stripped);
        self.flush_pending_break();
        self.push_chars(&visible);
    }

    fn tag(&mut self, tag: RawTag) {
        let element = classify(&tag.name);
        if !matches!(element, Element::Block) {
            self.flush_space();
        }
        match element {
            Element::Style(kind) => {
                let depth = &mut self.depth[kind as usize];
                if tag.closing {
                    *depth = depth.saturating_sub(1);
                } else if !tag.self_closing {
                    *depth += 1;
                }
            }
            Element::Link => {
                if tag.closing {
                    self.links.pop();
                } else if !tag.self_closing {
                    self.links.push(tag.href);
                }
            }
            Element::LineBreak => {
                if !tag.closing {
                    self.flush_pending_break();
                    self.push_chars("\n");
                }
            }
            Element::Block => {
                if tag.closing {
                    self.flush_space();
                    self.pending_break = true;
                    self.block_just_opened = false;
                } else {
                    self.pending_space.clear();
                    if !self.block_just_opened && (self.len > 0 || self.seen_block) {
                        self.push_plain_break();
                    }
                    self.seen_block = true;
                    self.pending_break = false;
                    self.block_just_opened = true;
                }
            }
            Element::Skipped | Element::Unknown => {
                trace!(tag = %tag.name, closing = tag.closing, "ignoring element");
            }
        }
    }
}

/// Parse `html` into text and ranges. Never fails.
#[must_use]
pub fn decode(html: &str) -> Fragment {
    let mut decoder = Decoder::default();
    let mut rest = html;

    while !rest.is_empty() {
        let Some(lt) = rest.find('<') else {
            decoder.text(rest);
            break;
        };
        if lt > 0 {
            decoder.text(&rest[..lt]);
            rest = &rest[lt..];
        }

        if let Some(after) = rest.strip_prefix("<!--") {
            rest = after.find("-->").map_or("", |end| &after[end + 3..]);
            continue;
        }
        if rest.starts_with("<!") || rest.starts_with("<?") {
            rest = rest.find('>').map_or("", |end| &rest[end + 1..]);
            continue;
        }

        match parse_tag(rest) {
            Some((tag, consumed)) => {
                rest = &rest[consumed..];
                if !tag.closing && !tag.self_closing && SKIPPED_ELEMENTS.contains(&tag.name.as_str())
                {
                    rest = skip_element_content(rest, &tag.name);
                    continue;
                }
                decoder.tag(tag);
            }
            None => {
                // A stray '<' is just text.
                decoder.text("<");
                rest = &rest[1..];
            }
        }
    }

    decoder.flush_space();
    decoder.fragment
}

/// Skip past the end tag of `name`, or to the end of input.
fn skip_element_content<'a>(rest: &'a str, name: &str) -> &'a str {
    let lower = rest.to_ascii_lowercase();
    let needle = format!("</{name}");
    match lower.find(&needle) {
        Some(pos) => {
            let after = &rest[pos..];
            after.find('>').map_or("", |end| &after[end + 1..])
        }
        None => "",
    }
}

/// Parse a tag at the start of `s` (which begins with `<`).
///
/// Returns the tag and the number of bytes consumed, or `None` when the
/// input is not a well-formed tag.
fn parse_tag(s: &str) -> Option<(RawTag, usize)> {
    let bytes = s.as_bytes();
    let mut i = 1;
    let mut tag = RawTag::default();

    if bytes.get(i) == Some(&b'/') {
        tag.closing = true;
        i += 1;
    }
    let name_start = i;
    while bytes.get(i).is_some_and(u8::is_ascii_alphanumeric) {
        i += 1;
    }
    if i == name_start || !bytes[name_start].is_ascii_alphabetic() {
        return None;
    }
    tag.name = s[name_start..i].to_ascii_lowercase();

    loop {
        while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
            i += 1;
        }
        match bytes.get(i)? {
            b'>' => return Some((tag, i + 1)),
            b'/' => {
                tag.self_closing = true;
                i += 1;
            }
            _ => {
                let (name, value, next) = parse_attribute(s, i)?;
                if name.eq_ignore_ascii_case("href") {
                    tag.href = value.map(|v| unescape(v).into_owned());
                }
                i = next;
            }
        }
    }
}

/// Parse `name[=value]` at byte `start`.
///
/// Returns the name, the raw value and the offset just past the attribute.
fn parse_attribute(s: &str, start: usize) -> Option<(&str, Option<&str>, usize)> {
    let bytes = s.as_bytes();
    let mut i = start;
    while bytes
        .get(i)
        .is_some_and(|&b| !b.is_ascii_whitespace() && !matches!(b, b'=' | b'>' | b'/'))
    {
        i += 1;
    }
    let name = &s[start..i];
    if name.is_empty() {
        // A lone '=' or similar junk; step over it.
        return Some(("", None, i + 1));
    }

    let mut j = i;
    while bytes.get(j).is_some_and(u8::is_ascii_whitespace) {
        j += 1;
    }
    if bytes.get(j) != Some(&b'=') {
        return Some((name, None, i));
    }
    j += 1;
    while bytes.get(j).is_some_and(u8::is_ascii_whitespace) {
        j += 1;
    }

    match *bytes.get(j)? {
        quote @ (b'"' | b'\'') => {
            let value_start = j + 1;
            let len = s[value_start..].find(quote as char)?;
            Some((name, Some(&s[value_start..value_start + len]), value_start + len + 1))
        }
        _ => {
            let value_start = j;
            while bytes
                .get(j)
                .is_some_and(|&b| !b.is_ascii_whitespace() && b != b'>')
            {
                j += 1;
            }
            Some((name, Some(&s[value_start..j]), j))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::TextAttributes;

    fn r(start: usize, end: usize) -> TextRange {
        TextRange::new(start, end).unwrap()
    }

    fn ranges(fragment: &Fragment, kind: StyleKind) -> Vec<(usize, usize)> {
        fragment
            .styles
            .get(kind)
            .iter()
            .map(|s| (s.range.start, s.range.end))
            .collect()
    }

    // ============================================
    // Tag parsing
    // ============================================

    #[test]
    fn test_parse_tag_variants() {
        let (tag, n) = parse_tag("<B>rest").unwrap();
        assert_eq!(tag.name, "b");
        assert!(!tag.closing);
        assert_eq!(n, 3);

        let (tag, _) = parse_tag("</strong >").unwrap();
        assert!(tag.closing);
        assert_eq!(tag.name, "strong");

        let (tag, _) = parse_tag("<br/>").unwrap();
        assert!(tag.self_closing);

        assert!(parse_tag("< b>").is_none());
        assert!(parse_tag("<1>").is_none());
        assert!(parse_tag("<b").is_none());
    }

    #[test]
    fn test_parse_href_quoting() {
        let (tag, _) = parse_tag(r#"<a class="x" href="https://a.test/?x=1&amp;y=2">"#).unwrap();
        assert_eq!(tag.href.as_deref(), Some("https://a.test/?x=1&y=2"));

        let (tag, _) = parse_tag("<a HREF='single'>").unwrap();
        assert_eq!(tag.href.as_deref(), Some("single"));

        let (tag, _) = parse_tag("<a href=bare target=_blank>").unwrap();
        assert_eq!(tag.href.as_deref(), Some("bare"));

        let (tag, _) = parse_tag("<a name=anchor>").unwrap();
        assert_eq!(tag.href, None);
    }

    // ============================================
    // Decoding
    // ============================================

    #[test]
    fn test_decode_plain_text() {
        let fragment = decode("Hello &amp; goodbye");
        assert_eq!(fragment.text, "Hello & goodbye");
        assert!(fragment.styles.is_empty());
        assert!(fragment.links.is_empty());
    }

    #[test]
    fn test_decode_nested_styles() {
        let fragment = decode("<b>aa<i>bb</i></b><em>cc</em>");
        assert_eq!(fragment.text, "aabbcc");
        assert_eq!(ranges(&fragment, StyleKind::Bold), vec![(0, 4)]);
        assert_eq!(ranges(&fragment, StyleKind::Italic), vec![(2, 6)]);
        assert_eq!(
            fragment.styles.attributes_at(3),
            TextAttributes::BOLD | TextAttributes::ITALIC
        );
    }

    #[test]
    fn test_decode_strike_aliases_and_underline() {
        let fragment = decode("<s>a</s><strike>b</strike><del>c</del><u>d</u>");
        assert_eq!(ranges(&fragment, StyleKind::Strikethrough), vec![(0, 3)]);
        assert_eq!(ranges(&fragment, StyleKind::Underline), vec![(3, 4)]);
    }

    #[test]
    fn test_decode_links() {
        let fragment = decode(r#"go <a href="https://x.test">there</a> now"#);
        assert_eq!(fragment.text, "go there now");
        assert_eq!(fragment.links.len(), 1);
        assert_eq!(fragment.links.spans()[0].range, r(3, 8));
        assert_eq!(fragment.links.lookup_at(3), Some("https://x.test"));
    }

    #[test]
    fn test_decode_nested_link_innermost_wins() {
        let fragment = decode(r#"<a href="outer">a<a href="inner">b</a>c</a>"#);
        assert_eq!(fragment.links.lookup_at(0), Some("outer"));
        assert_eq!(fragment.links.lookup_at(1), Some("inner"));
        assert_eq!(fragment.links.lookup_at(2), Some("outer"));
        assert!(fragment.links.is_normalized());
    }

    #[test]
    fn test_decode_anchor_without_href_is_plain() {
        let fragment = decode("<a name=\"top\">x</a>");
        assert_eq!(fragment.text, "x");
        assert!(fragment.links.is_empty());
    }

    #[test]
    fn test_decode_unknown_tags_keep_text() {
        let fragment = decode(r#"<span class="s1"><b>bold</b> text</span><font>!</font>"#);
        assert_eq!(fragment.text, "bold text!");
        assert_eq!(ranges(&fragment, StyleKind::Bold), vec![(0, 4)]);
    }

    #[test]
    fn test_decode_paragraphs_and_breaks() {
        assert_eq!(decode("<p>a</p><p>b</p>").text, "a\nb");
        assert_eq!(decode("<p>a</p><p></p><p>b</p>").text, "a\n\nb");
        assert_eq!(decode("<p>a</p>b").text, "a\nb");
        assert_eq!(decode("a<br>b<br/>").text, "a\nb\n");
        assert_eq!(decode("<div>x</div><div>y</div>").text, "x\ny");
    }

    #[test]
    fn test_decode_markup_newlines_are_insignificant() {
        let fragment = decode("<p dir=\"ltr\">one</p>\n<p dir=\"ltr\"><b>two</b></p>\n");
        assert_eq!(fragment.text, "one\ntwo");
        assert_eq!(ranges(&fragment, StyleKind::Bold), vec![(4, 7)]);
    }

    #[test]
    fn test_decode_line_break_references_are_text() {
        assert_eq!(decode("a&#10;b&#13;c").text, "a\nb\rc");
        assert_eq!(decode("<b>x&#xA;</b>\r\ny").text, "x\ny");
        assert_eq!(decode("one&#13;<br>two").text, "one\r\ntwo");
    }

    #[test]
    fn test_decode_drops_indentation_between_blocks() {
        let fragment = decode("<p>a</p>\n  <p><i>b</i></p>\n\t<div>c</div>  ");
        assert_eq!(fragment.text, "a\nb\nc");
        assert_eq!(ranges(&fragment, StyleKind::Italic), vec![(2, 3)]);

        // Non-blank text after a block is still content.
        assert_eq!(decode("<p>a</p>  b").text, "a\n  b");
        // So is whitespace inside a block or between inline elements.
        assert_eq!(decode("<p> </p>").text, " ");
        assert_eq!(decode("<b>x</b> <i>y</i>").text, "x y");
        assert_eq!(decode("<b>x</b> ").text, "x ");

        // Nested blocks open one line, not two.
        let fragment = decode("<div>\n  <p>one</p>\n  <p><u>two</u></p>\n</div>\n");
        assert_eq!(fragment.text, "one\ntwo");
        assert_eq!(ranges(&fragment, StyleKind::Underline), vec![(4, 7)]);
        assert_eq!(decode("<p></p><p>b</p>").text, "\nb");
    }

    #[test]
    fn test_decode_full_document() {
        let html = "<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 4.01//EN\">\n\
            <html><head><meta charset=\"UTF-8\"><title>t</title>\
            <style type=\"text/css\">p.p1 {margin: 0.0px}</style></head>\
            <body><!-- generated --><p class=\"p1\">Hi <u>there</u></p></body></html>";
        let fragment = decode(html);
        assert_eq!(fragment.text, "Hi there");
        assert_eq!(ranges(&fragment, StyleKind::Underline), vec![(3, 8)]);
    }

    #[test]
    fn test_decode_is_lenient_with_broken_markup() {
        assert_eq!(decode("a < b").text, "a < b");
        assert_eq!(decode("</b>x<b>y").text, "xy");
        assert_eq!(decode("<b>unterminated").text, "unterminated");
        assert_eq!(decode("tail <b").text, "tail <b");
        assert_eq!(decode("<!-- never closed").text, "");
        assert_eq!(decode("<a href=\"open").text, "<a href=\"open");
    }

    #[test]
    fn test_decode_offsets_are_chars() {
        let fragment = decode("<b>héllo</b> wörld");
        assert_eq!(ranges(&fragment, StyleKind::Bold), vec![(0, 5)]);
        assert_eq!(fragment.len_chars(), 11);
    }
}
