// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod dictionary;
pub mod version;

// Re-export main types
pub use api::{create_app, serve, ApiConfig, AppState};
pub use dictionary::{
    ChitankaClient, DictionaryConfig, DictionaryEntry, DictionarySource, EntryLink, LookupError,
};
