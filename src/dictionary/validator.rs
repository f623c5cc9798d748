// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Input validation for looked-up words
//!
//! Rules run in a fixed order and the first violated rule decides the error
//! message returned to the client. Validation is pure and happens before any
//! network call.

use regex::RegexSet;
use std::sync::OnceLock;
use thiserror::Error;

/// Maximum length of a trimmed word, in characters
pub const MAX_WORD_CHARS: usize = 150;

/// Maximum share of `< > ' " &` characters in a trimmed word
pub const MAX_SPECIAL_CHAR_RATIO: f64 = 0.3;

const SPECIAL_CHARS: [char; 5] = ['<', '>', '\'', '"', '&'];

const SUSPICIOUS_PATTERNS: [&str; 8] = [
    r"(?i)<script",
    r"(?i)javascript:",
    r"(?i)on[a-z0-9_]+=",
    r"(?i)<iframe",
    r"(?i)<object",
    r"(?i)<embed",
    r"(?i)vbscript:",
    r"(?i)data:",
];

static SUSPICIOUS_SET: OnceLock<RegexSet> = OnceLock::new();

/// Raw word parameter as received from the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordInput {
    /// A single textual value
    Text(String),
    /// The parameter was repeated, producing several values
    List(Vec<String>),
}

impl WordInput {
    /// Build an input from every value supplied for one parameter name
    pub fn from_values(mut values: Vec<String>) -> Option<Self> {
        match values.len() {
            0 => None,
            1 => values.pop().map(Self::Text),
            _ => Some(Self::List(values)),
        }
    }

    /// The value used in client-facing messages
    pub fn display_value(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::List(values) => values.join(","),
        }
    }

    fn is_blank_text(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }
}

/// Pick the `word` parameter when it is present and non-empty, otherwise `q`
pub fn pick_word_param(word: Option<WordInput>, q: Option<WordInput>) -> Option<WordInput> {
    match word {
        Some(input) if !input.is_blank_text() => Some(input),
        _ => q,
    }
}

/// Validation failures, displayed with the exact client-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Word parameter is required.")]
    Missing,
    #[error("Word must be a string")]
    NotText,
    #[error("Word cannot be empty")]
    Empty,
    #[error("Word is too long (max 150 characters)")]
    TooLong,
    #[error("Invalid characters detected")]
    SuspiciousPattern,
    #[error("Too many special characters")]
    TooManySpecialChars,
}

/// A single check applied to the trimmed word
struct Rule {
    name: &'static str,
    violated: fn(&str) -> bool,
    error: ValidationError,
}

/// Checks on the trimmed word, in evaluation order
const TRIMMED_RULES: &[Rule] = &[
    Rule {
        name: "non_empty",
        violated: is_empty,
        error: ValidationError::Empty,
    },
    Rule {
        name: "max_length",
        violated: exceeds_max_length,
        error: ValidationError::TooLong,
    },
    Rule {
        name: "suspicious_pattern",
        violated: matches_suspicious_pattern,
        error: ValidationError::SuspiciousPattern,
    },
    Rule {
        name: "special_char_density",
        violated: exceeds_special_char_ratio,
        error: ValidationError::TooManySpecialChars,
    },
];

fn is_empty(word: &str) -> bool {
    word.is_empty()
}

fn exceeds_max_length(word: &str) -> bool {
    word.chars().count() > MAX_WORD_CHARS
}

fn suspicious_set() -> &'static RegexSet {
    SUSPICIOUS_SET.get_or_init(|| {
        RegexSet::new(SUSPICIOUS_PATTERNS).unwrap_or_else(|_| RegexSet::empty())
    })
}

fn matches_suspicious_pattern(word: &str) -> bool {
    suspicious_set().is_match(word)
}

fn exceeds_special_char_ratio(word: &str) -> bool {
    let total = word.chars().count();
    let special = word.chars().filter(|c| SPECIAL_CHARS.contains(c)).count();
    special as f64 > total as f64 * MAX_SPECIAL_CHAR_RATIO
}

/// Validate a raw word parameter
///
/// Returns the trimmed word when every rule passes.
pub fn validate_word(input: Option<&WordInput>) -> Result<String, ValidationError> {
    let raw = match input {
        None => return Err(ValidationError::Missing),
        Some(WordInput::Text(text)) if text.is_empty() => return Err(ValidationError::Missing),
        Some(WordInput::Text(text)) => text,
        Some(WordInput::List(_)) => return Err(ValidationError::NotText),
    };

    validate_text(raw)
}

/// Validate a word that is already known to be text
pub fn validate_text(raw: &str) -> Result<String, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::Missing);
    }

    let trimmed = raw.trim();
    if let Some(rule) = TRIMMED_RULES.iter().find(|rule| (rule.violated)(trimmed)) {
        tracing::debug!(rule = rule.name, "word rejected");
        return Err(rule.error);
    }

    Ok(trimmed.to_string())
}
