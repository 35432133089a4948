//! HTML character escaping and entity decoding.

use std::borrow::Cow;

/// Longest entity body we try to recognize (`&#x10FFFF;` and friends).
const MAX_ENTITY_LEN: usize = 10;

/// Append `ch` to `out`, escaped for element content.
pub fn push_text_char(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        // Raw line breaks in markup are insignificant to the decoder.
        '\r' => out.push_str("&#13;"),
        _ => out.push(ch),
    }
}

/// Append `value` to `out`, escaped for a double-quoted attribute.
pub fn push_attr(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("&quot;"),
            _ => push_text_char(out, ch),
        }
    }
}

/// Decode character references.
///
/// Unknown or malformed references are kept literally.
#[must_use]
pub fn unescape(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match decode_entity(rest) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Decode one reference at the start of `s` (which begins with `&`).
///
/// Returns the char and the number of bytes consumed, including `;`.
fn decode_entity(s: &str) -> Option<(char, usize)> {
    let body_end = s
        .char_indices()
        .take(MAX_ENTITY_LEN + 2)
        .find(|&(_, c)| c == ';')
        .map(|(i, _)| i)?;
    let body = &s[1..body_end];

    let ch = if let Some(num) = body.strip_prefix('#') {
        let hex = num.strip_prefix('x').or_else(|| num.strip_prefix('X'));
        let code = match hex {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        char::from_u32(code)?
    } else {
        match body {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            "nbsp" => '\u{a0}',
            _ => return None,
        }
    };
    Some((ch, body_end + 1))
}
