// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Dictionary lookup core
//!
//! A straight pipeline with no shared state:
//!
//! ```text
//! raw word → validator → ChitankaClient (GET /w/<word>) → parser → sanitized entry
//! ```
//!
//! Every upstream failure ends up as "not found" for the client; the
//! distinct failure classes only show up in server-side logs.

pub mod client;
pub mod config;
pub mod document;
pub mod parser;
pub mod sanitizer;
pub mod source;
pub mod types;
pub mod validator;

// Re-export commonly used types
pub use client::{ChitankaClient, ClientError};
pub use config::DictionaryConfig;
pub use parser::parse_entry;
pub use sanitizer::sanitize_text;
pub use source::DictionarySource;
pub use types::{DictionaryEntry, EntryLink, LookupError};
pub use validator::{pick_word_param, validate_text, validate_word, ValidationError, WordInput};
