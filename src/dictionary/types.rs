// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for dictionary lookups

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A related-word link listed on a dictionary page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryLink {
    /// Sanitized link text
    pub text: String,
    /// Absolute URL of the linked page
    pub url: String,
}

/// A parsed dictionary entry
///
/// Built fresh for every request and dropped once the response is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    /// Headword as rendered by the upstream page
    pub word: String,
    /// Canonical source URL for this entry
    pub dictionary_url: String,
    /// Word form with stress marks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stressed_word: Option<String>,
    /// Part of speech, the label text before the first `(`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_type: Option<String>,
    /// Parenthesized remainder of the type label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_class: Option<String>,
    /// Absolute URL of the grammar reference page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_link: Option<String>,
    /// Definition text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    /// Synonym list as rendered text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<String>,
    /// Related-word links
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<EntryLink>>,
}

impl DictionaryEntry {
    /// Whether the entry carries any content besides the headword.
    ///
    /// An entry without meaning, stressed form, type, synonyms or links is
    /// reported as not found.
    pub fn has_content(&self) -> bool {
        self.meaning.is_some()
            || self.stressed_word.is_some()
            || self.word_type.is_some()
            || self.synonyms.is_some()
            || self.links.as_ref().is_some_and(|links| !links.is_empty())
    }
}

/// Reasons a lookup produced no entry
///
/// Clients see every variant as "not found". Everything except `NotFound`
/// is an upstream failure kept for server-side diagnostics.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Word absent upstream, or the page carried no usable content
    #[error("No definition found for \"{word}\"")]
    NotFound { word: String },

    /// Upstream answered with a non-success status other than 404
    #[error("Upstream returned HTTP {status}")]
    UpstreamStatus { status: u16 },

    /// DNS failure or connection refused
    #[error("Dictionary website is unreachable: {message}")]
    Unreachable { message: String },

    /// Request timed out or the connection was reset
    #[error("Connection timeout or reset: {message}")]
    Timeout { message: String },

    /// Any other transport or decoding failure
    #[error("Error fetching dictionary page: {message}")]
    Transport { message: String },
}

impl LookupError {
    /// Create a plain not-found error for `word`
    pub fn not_found(word: impl Into<String>) -> Self {
        Self::NotFound { word: word.into() }
    }

    /// Whether this outcome came from an upstream failure rather than a
    /// missing word
    pub fn is_upstream_failure(&self) -> bool {
        !matches!(self, Self::NotFound { .. })
    }

    /// Short label used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::UpstreamStatus { .. } => "upstream_status",
            Self::Unreachable { .. } => "unreachable",
            Self::Timeout { .. } => "timeout",
            Self::Transport { .. } => "transport",
        }
    }
}
