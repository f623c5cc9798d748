// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Dictionary source trait definition

use async_trait::async_trait;

use super::types::{DictionaryEntry, LookupError};

/// Trait for anything that can resolve a word into a dictionary entry
///
/// The HTTP layer only depends on this trait, so tests can swap the real
/// upstream client for a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DictionarySource: Send + Sync {
    /// Look up a word
    ///
    /// # Arguments
    /// * `word` - The word as supplied by the client, before trimming
    ///
    /// # Returns
    /// The parsed entry, or a [`LookupError`] that the caller reports as
    /// not found
    async fn lookup(&self, word: &str) -> Result<DictionaryEntry, LookupError>;

    /// Source name for logging
    fn name(&self) -> &'static str;
}
