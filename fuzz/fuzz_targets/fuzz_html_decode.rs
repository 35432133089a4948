//! Fuzz target for lenient HTML decoding.
//!
//! Decoding must accept any input without panicking and always produce
//! normalized ranges that lie inside the decoded text.

#![no_main]

use libfuzzer_sys::fuzz_target;
use richtext::RichText;

fuzz_target!(|data: &str| {
    let doc = RichText::from_html(data);
    let len = doc.len_chars();
    assert!(doc.styles().is_normalized());
    assert!(doc.links().is_normalized());
    for run in doc.runs() {
        assert!(run.range.end <= len);
    }

    // Whatever was decoded must survive a round trip unchanged.
    let again = RichText::from_html(&doc.to_html());
    assert_eq!(again.text(), doc.text());
    assert_eq!(again.styles(), doc.styles());
    assert_eq!(again.links(), doc.links());
});
