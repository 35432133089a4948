//! Integration tests for the HTML codec against markup real platform
//! writers produce.

mod common;

use common::{link_spans, setup_test_logging, style_spans};
use insta::assert_snapshot;
use richtext::html::{self, EncodeOptions, LineBreaks, StrikeTag};
use richtext::{RichText, Selection, StyleKind};

// ============================================================================
// Decoding Platform Markup
// ============================================================================

#[test]
fn test_decode_android_paragraphs() {
    setup_test_logging();
    let markup = "<p dir=\"ltr\">Shopping <b>list</b></p>\n\
                  <p dir=\"ltr\"><strike>milk</strike> <i>eggs</i></p>\n";
    let doc = RichText::from_html(markup);

    assert_eq!(doc.text(), "Shopping list\nmilk eggs");
    assert_eq!(style_spans(&doc, StyleKind::Bold), vec![(9, 13)]);
    assert_eq!(style_spans(&doc, StyleKind::Strikethrough), vec![(14, 18)]);
    assert_eq!(style_spans(&doc, StyleKind::Italic), vec![(19, 23)]);
}

#[test]
fn test_decode_exported_document() {
    setup_test_logging();
    let markup = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">
<html>
<head>
<meta http-equiv="Content-Type" content="text/html; charset=UTF-8">
<meta http-equiv="Content-Style-Type" content="text/css">
<title></title>
<style type="text/css">
p.p1 {margin: 0.0px 0.0px 0.0px 0.0px; font: 17.0px '.SF UI Text'}
span.s1 {text-decoration: underline}
</style>
</head>
<body>
<p class="p1"><span class="s1">Visit</span> <a href="https://example.com/a?b=1&amp;c=2"><b>our site</b></a></p>
</body>
</html>
"#;
    let doc = RichText::from_html(markup);

    assert_eq!(doc.text(), "Visit our site");
    assert_eq!(style_spans(&doc, StyleKind::Bold), vec![(6, 14)]);
    assert_eq!(
        link_spans(&doc),
        vec![(6, 14, "https://example.com/a?b=1&c=2".to_string())]
    );
    // Styling through CSS classes is not part of the subset.
    assert!(doc.styles().get(StyleKind::Underline).is_empty());
}

#[test]
fn test_decode_entities_and_aliases() {
    let fragment = html::decode("<strong>Tom &amp; Jerry</strong> &lt;3 <em>caf&#233;</em> <del>x</del>");
    assert_eq!(fragment.text, "Tom & Jerry <3 café x");
    let bold: Vec<_> = fragment
        .styles
        .get(StyleKind::Bold)
        .iter()
        .map(|s| (s.range.start, s.range.end))
        .collect();
    assert_eq!(bold, vec![(0, 11)]);
}

#[test]
fn test_decode_line_break_references() {
    let fragment = html::decode("a&#10;b&#13;c&#xA;d");
    assert_eq!(fragment.text, "a\nb\rc\nd");

    // Indented block markup adds no text of its own.
    let doc = RichText::from_html("<div>\n  <p>one</p>\n  <p><u>two</u></p>\n</div>\n");
    assert_eq!(doc.text(), "one\ntwo");
    assert_eq!(style_spans(&doc, StyleKind::Underline), vec![(4, 7)]);
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn test_encode_canonical_nesting() {
    let mut doc = RichText::with_text("all four styles");
    for kind in [
        StyleKind::Underline,
        StyleKind::Italic,
        StyleKind::Strikethrough,
        StyleKind::Bold,
    ] {
        doc.toggle_range(kind, Selection::new(4, 8)).unwrap();
    }
    doc.embed_link(0, 8, "https://x.test").unwrap();
    assert_snapshot!(
        doc.to_html(),
        @r#"<a href="https://x.test">all <b><i><s><u>four</u></s></i></b></a> styles"#
    );
}

#[test]
fn test_encode_staggered_ranges() {
    let mut doc = RichText::with_text("abcdefghij");
    doc.toggle_range(StyleKind::Bold, Selection::new(0, 6)).unwrap();
    doc.toggle_range(StyleKind::Underline, Selection::new(3, 9))
        .unwrap();
    assert_snapshot!(doc.to_html(), @"<b>abc<u>def</u></b><u>ghi</u>j");
}

#[test]
fn test_encode_paragraph_mode() {
    let mut doc = RichText::with_text("line one\nline two");
    doc.toggle_range(StyleKind::Strikethrough, Selection::new(5, 13))
        .unwrap();
    let options = EncodeOptions {
        strike_tag: StrikeTag::Strike,
        line_breaks: LineBreaks::Paragraphs,
    };
    assert_snapshot!(
        doc.to_html_with(&options),
        @"<p>line <strike>one</strike></p><p><strike>line</strike> two</p>"
    );
}

// ============================================================================
// Round Trips
// ============================================================================

#[test]
fn test_round_trip_after_edits() {
    setup_test_logging();
    let mut doc = RichText::from_html("<b>x &amp; y</b><br><a href=\"q\">z</a>");
    doc.insert(2, "<&>").unwrap();
    doc.toggle_range(StyleKind::Italic, Selection::new(0, 9))
        .unwrap();

    let html = doc.to_html();
    assert_snapshot!(html, @r#"<b><i>x &lt;&amp;&gt;&amp; y</i></b><i><br></i><a href="q">z</a>"#);
    let reloaded = RichText::from_html(&html);
    assert_eq!(reloaded.text(), doc.text());
    assert_eq!(reloaded.styles(), doc.styles());
    assert_eq!(reloaded.links(), doc.links());
}

#[test]
fn test_round_trip_crlf_text() {
    let mut doc = RichText::with_text("line one\r\nline two\ttab\u{a0}nbsp");
    doc.toggle_range(StyleKind::Bold, Selection::new(0, 4))
        .unwrap();
    doc.embed_link(10, 18, "https://crlf.test").unwrap();

    let html = doc.to_html();
    assert_eq!(
        html,
        "<b>line</b> one&#13;<br><a href=\"https://crlf.test\">line two</a>\ttab\u{a0}nbsp"
    );
    let reloaded = RichText::from_html(&html);
    assert_eq!(reloaded.text(), doc.text());
    assert_eq!(reloaded.styles(), doc.styles());
    assert_eq!(reloaded.links(), doc.links());
}
