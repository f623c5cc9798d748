// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text sanitizing for extracted dictionary fields
//!
//! Applied to every textual field before it goes into a
//! [`DictionaryEntry`](super::types::DictionaryEntry). Never applied to URLs.

/// Escape markup characters and normalize whitespace
///
/// `< > " ' /` become HTML entities, runs of whitespace (including line
/// breaks) collapse to one space, and the result is trimmed.
pub fn sanitize_text(text: &str) -> String {
    let escaped = escape_markup(text);
    collapse_whitespace(&escaped)
}

fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Collapse whitespace runs to single spaces and trim both ends
///
/// Blank lines disappear as part of the same pass.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
