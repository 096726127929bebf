//! Character-set escaping for XML/HTML text and attributes, and JSON strings.
//!
//! The source this library is modeled on left escaping as a passthrough
//! stub. That is not reproduced here: a conforming XML/JSON renderer must
//! actually escape, so this module implements the standard escape sets.

use std::borrow::Cow;

/// Escape text content for XML or HTML (`&`, `<`, `>`).
pub fn escape_text(input: &str) -> Cow<'_, str> {
    if !input.bytes().any(|b| matches!(b, b'&' | b'<' | b'>')) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 8);
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Escape an XML/HTML attribute value (`&`, `<`, `>`, `"`).
pub fn escape_attr(input: &str) -> Cow<'_, str> {
    if !input.bytes().any(|b| matches!(b, b'&' | b'<' | b'>' | b'"')) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 8);
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Escape a string for embedding inside a JSON string literal, per RFC 8259
/// (quote, backslash, and control characters below `0x20`).
pub fn escape_json(input: &str) -> Cow<'_, str> {
    if !input
        .bytes()
        .any(|b| b == b'"' || b == b'\\' || b < 0x20)
    {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 8);
    for ch in input.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
