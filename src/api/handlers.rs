// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{rejection::PathRejection, Path, RawQuery, State},
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};

use super::docs::load_docs_page;
use super::errors::ApiError;
use super::http_server::AppState;
use super::response_formatter::{ok, timestamp, SuccessEnvelope};
use crate::dictionary::{
    pick_word_param, validate_text, validate_word, DictionaryEntry, LookupError, ValidationError,
    WordInput,
};
use crate::version;

pub const SERVICE_NAME: &str = "Chitanka Dictionary API";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            version: version::VERSION.to_string(),
            timestamp: timestamp(),
        }
    }
}

/// Parameters accepted by `GET /api`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupQuery {
    pub word: Option<WordInput>,
    pub q: Option<WordInput>,
}

impl LookupQuery {
    /// Collect `word` and `q` from a raw query string, keeping repeated values
    ///
    /// Bracketed keys (`word[]=a`, `q[0]=a`) always produce a list, even
    /// with a single value.
    pub fn parse(raw: Option<&str>) -> Self {
        let mut word = ParamValues::default();
        let mut q = ParamValues::default();

        if let Some(raw) = raw {
            for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
                let (name, bracketed) = match key.split_once('[') {
                    Some((name, _)) => (name, true),
                    None => (&*key, false),
                };
                let target = match name {
                    "word" => &mut word,
                    "q" => &mut q,
                    _ => continue,
                };
                target.values.push(value.into_owned());
                target.bracketed |= bracketed;
            }
        }

        Self {
            word: word.into_input(),
            q: q.into_input(),
        }
    }

    /// The selected parameter, `word` taking precedence over `q`
    pub fn selected(self) -> Option<WordInput> {
        pick_word_param(self.word, self.q)
    }
}

#[derive(Default)]
struct ParamValues {
    values: Vec<String>,
    bracketed: bool,
}

impl ParamValues {
    fn into_input(self) -> Option<WordInput> {
        if self.bracketed {
            Some(WordInput::List(self.values))
        } else {
            WordInput::from_values(self.values)
        }
    }
}

pub async fn health_handler() -> Json<SuccessEnvelope<HealthStatus>> {
    Json(ok(HealthStatus::healthy()))
}

pub async fn lookup_query_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<SuccessEnvelope<DictionaryEntry>>, ApiError> {
    let input = LookupQuery::parse(query.as_deref()).selected();
    let raw = input
        .as_ref()
        .map(WordInput::display_value)
        .unwrap_or_default();

    validate_word(input.as_ref()).map_err(invalid_request)?;
    run_lookup(&state, &raw).await
}

pub async fn lookup_path_handler(
    State(state): State<AppState>,
    word: Result<Path<String>, PathRejection>,
) -> Result<Json<SuccessEnvelope<DictionaryEntry>>, ApiError> {
    let Path(raw) = word.map_err(|e| ApiError::InternalError(format!("path decoding: {}", e)))?;

    validate_text(&raw).map_err(invalid_request)?;
    run_lookup(&state, &raw).await
}

pub async fn docs_handler(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    load_docs_page(&state.config.docs_path).await.map(Html)
}

pub async fn not_found_handler() -> ApiError {
    ApiError::RouteNotFound
}

/// Look up a validated word; the raw input is passed through untouched
async fn run_lookup(
    state: &AppState,
    raw: &str,
) -> Result<Json<SuccessEnvelope<DictionaryEntry>>, ApiError> {
    match state.source.lookup(raw).await {
        Ok(entry) => Ok(Json(ok(entry))),
        Err(e) => {
            tracing::debug!(kind = e.kind(), "lookup for {:?} failed", raw);
            Err(ApiError::NotFound(
                LookupError::not_found(raw).to_string(),
            ))
        }
    }
}

fn invalid_request(e: ValidationError) -> ApiError {
    tracing::debug!("Validation failed: {}", e);
    ApiError::InvalidRequest(e.to_string())
}
