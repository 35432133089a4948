//! Fuzz target for arbitrary editing sequences.
//!
//! Drives a document with random toggles, link operations and edits and
//! checks the range invariants after every step.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use richtext::{RichText, Selection, StyleKind};

#[derive(Arbitrary, Debug)]
enum Op {
    Toggle(u8, u16, u16),
    Embed(u16, u16, bool),
    RemoveLink(u16),
    Insert(u16, String),
    Delete(u16, u16),
    Paste(u16, String),
}

#[derive(Arbitrary, Debug)]
struct Input {
    text: String,
    ops: Vec<Op>,
}

fn clamp(doc: &RichText, pos: u16) -> usize {
    usize::from(pos) % (doc.len_chars() + 1)
}

fuzz_target!(|input: Input| {
    let mut doc = RichText::with_text(&input.text);
    for op in input.ops.iter().take(64) {
        let _ = match op {
            Op::Toggle(kind, a, b) => {
                let kind = StyleKind::ALL[usize::from(*kind) % StyleKind::ALL.len()];
                let sel = Selection::new(clamp(&doc, *a), clamp(&doc, *b));
                doc.toggle_range(kind, sel).map(drop)
            }
            Op::Embed(a, b, alt) => {
                let sel = Selection::new(clamp(&doc, *a), clamp(&doc, *b));
                let href = if *alt { "https://b.test" } else { "https://a.test" };
                doc.embed_link(sel.start, sel.end, href)
            }
            Op::RemoveLink(pos) => doc.remove_link(clamp(&doc, *pos)).map(drop),
            Op::Insert(at, text) => doc.insert(clamp(&doc, *at), text).map(drop),
            Op::Delete(a, b) => {
                let sel = Selection::new(clamp(&doc, *a), clamp(&doc, *b));
                doc.delete(sel.start, sel.end)
            }
            Op::Paste(at, markup) => doc.insert_markup(markup, clamp(&doc, *at)).map(drop),
        };
        assert!(doc.styles().is_normalized());
        assert!(doc.links().is_normalized());
    }
});
