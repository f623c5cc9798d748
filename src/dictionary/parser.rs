// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Dictionary page parsing
//!
//! Turns a rechnik.chitanka.info word page into a [`DictionaryEntry`].
//! Element ids on the page carry a word-specific suffix, so fields are
//! located by id prefix.

use url::Url;

use super::document::{Document, Element};
use super::sanitizer::sanitize_text;
use super::types::{DictionaryEntry, EntryLink};

const HEADING_SELECTOR: &str = "h1#first-heading";
/// Heading phrase the site uses for missing words ("does not exist")
const MISSING_WORD_PHRASE: &str = "не съществува";
const STRESSED_ID_PREFIX: &str = "name-stressed_";
const TYPE_ID_PREFIX: &str = "type_";
const MEANING_ID_PREFIX: &str = "meaning_";
const SYNONYMS_PATH: [&str; 2] = [".synonyms", ".data"];
const LINKS_PATH: [&str; 4] = [".links", ".data", "ul", "li"];

/// Parse a dictionary page
///
/// Returns `None` when the heading is missing, announces a missing word, or
/// the page has no content fields at all.
///
/// # Arguments
/// * `html` - Raw page body
/// * `word` - The word that was looked up, used if the heading is blank
/// * `dictionary_url` - Canonical URL reported back to the client
/// * `base_url` - Upstream origin used to resolve relative links
pub fn parse_entry(
    html: &str,
    word: &str,
    dictionary_url: String,
    base_url: &Url,
) -> Option<DictionaryEntry> {
    let doc = Document::parse(html);

    let title = doc
        .select_first(HEADING_SELECTOR)
        .map(|el| el.text())
        .unwrap_or_default();
    if title.is_empty() || title.to_lowercase().contains(MISSING_WORD_PHRASE) {
        return None;
    }

    let stressed_word = doc
        .first_by_id_prefix(STRESSED_ID_PREFIX)
        .map(|el| el.text())
        .and_then(non_empty_sanitized);

    let type_element = doc.first_by_id_prefix(TYPE_ID_PREFIX);
    let type_text = type_element.map(|el| el.text()).unwrap_or_default();
    let type_link = type_element
        .and_then(|el| el.find_first("a"))
        .and_then(|anchor| anchor.attr("href"))
        .filter(|href| !href.is_empty())
        .map(|href| resolve_href(href, base_url));
    let (word_type, word_class) = split_type_label(&type_text);

    let meaning = doc
        .first_by_id_prefix(MEANING_ID_PREFIX)
        .map(|el| el.text())
        .and_then(non_empty_sanitized);

    let synonyms = non_empty_sanitized(doc.path_text(&SYNONYMS_PATH));

    let links: Vec<EntryLink> = doc
        .select_path(&LINKS_PATH)
        .iter()
        .filter_map(|item| parse_link(item, base_url))
        .collect();

    let heading = sanitize_text(&title);
    let entry = DictionaryEntry {
        word: if heading.is_empty() {
            sanitize_text(word)
        } else {
            heading
        },
        dictionary_url,
        stressed_word,
        word_type: non_empty_sanitized(word_type),
        word_class: word_class.and_then(non_empty_sanitized),
        type_link,
        meaning,
        synonyms,
        links: (!links.is_empty()).then_some(links),
    };

    entry.has_content().then_some(entry)
}

/// Split a combined type label on its first `(`
///
/// `"съществително име (мъжки род)"` becomes
/// `("съществително име", Some("(мъжки род)"))`.
pub fn split_type_label(label: &str) -> (String, Option<String>) {
    match label.split_once('(') {
        Some((before, after)) => (before.trim().to_string(), Some(format!("({}", after.trim()))),
        None => (label.trim().to_string(), None),
    }
}

/// Resolve a possibly relative href against the upstream origin
pub fn resolve_href(href: &str, base_url: &Url) -> String {
    if href.starts_with("http") {
        return href.to_string();
    }
    match base_url.join(href) {
        Ok(url) => url.to_string(),
        Err(_) => format!("{}{}", base_url.as_str().trim_end_matches('/'), href),
    }
}

fn parse_link(item: &Element<'_>, base_url: &Url) -> Option<EntryLink> {
    let text = item.text();
    let href = item.find_first("a")?.attr("href")?;
    if text.is_empty() || href.is_empty() {
        return None;
    }
    Some(EntryLink {
        text: sanitize_text(&text),
        url: resolve_href(href, base_url),
    })
}

fn non_empty_sanitized(text: impl AsRef<str>) -> Option<String> {
    let sanitized = sanitize_text(text.as_ref());
    (!sanitized.is_empty()).then_some(sanitized)
}
