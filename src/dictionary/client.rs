// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! rechnik.chitanka.info client
//!
//! Fetches one word page per lookup and parses it. A single attempt is made
//! per request: no retries, no caching.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONNECTION,
    UPGRADE_INSECURE_REQUESTS,
};
use reqwest::{Client, StatusCode};
use std::error::Error as _;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use url::Url;

use super::config::DictionaryConfig;
use super::parser::parse_entry;
use super::source::DictionarySource;
use super::types::{DictionaryEntry, LookupError};

/// Characters escaped in a path segment; everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, as JavaScript's `encodeURIComponent`
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Errors raised while building a [`ChitankaClient`]
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration failed validation
    #[error("invalid dictionary configuration: {0}")]
    InvalidConfig(String),

    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Dictionary source backed by rechnik.chitanka.info
pub struct ChitankaClient {
    client: Client,
    base_url: Url,
    config: DictionaryConfig,
}

impl ChitankaClient {
    /// Create a new client
    pub fn new(config: DictionaryConfig) -> Result<Self, ClientError> {
        config.validate().map_err(ClientError::InvalidConfig)?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .default_headers(browser_headers(&config)?)
            .build()?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Page URL for a word, percent-encoding it into the path
    pub fn word_url(&self, word: &str) -> String {
        format!(
            "{}/w/{}",
            self.config.base_url.trim_end_matches('/'),
            utf8_percent_encode(word, PATH_SEGMENT)
        )
    }

    /// Get the configuration
    pub fn config(&self) -> &DictionaryConfig {
        &self.config
    }

    async fn fetch_page(&self, url: &str, word: &str) -> Result<String, LookupError> {
        debug!("Fetching dictionary page: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Upstream has no page for {:?}", word);
            return Err(LookupError::not_found(word));
        }
        if !status.is_success() {
            return Err(LookupError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(classify_error)
    }
}

#[async_trait]
impl DictionarySource for ChitankaClient {
    async fn lookup(&self, word: &str) -> Result<DictionaryEntry, LookupError> {
        let trimmed = word.trim();
        let url = self.word_url(trimmed);

        let result = match self.fetch_page(&url, word).await {
            Ok(html) => parse_entry(&html, trimmed, self.word_url(word), &self.base_url)
                .ok_or_else(|| LookupError::not_found(word)),
            Err(e) => Err(e),
        };

        match &result {
            Ok(entry) => info!("Found entry {:?} for {:?}", entry.word, word),
            Err(LookupError::NotFound { .. }) => debug!("No entry for {:?}", word),
            Err(e @ LookupError::Unreachable { .. }) => {
                error!(kind = e.kind(), "Chitanka dictionary website is unreachable: {}", e)
            }
            Err(e @ LookupError::Timeout { .. }) => warn!(
                kind = e.kind(),
                "Connection timeout or reset when accessing Chitanka: {}", e
            ),
            Err(e) => error!(kind = e.kind(), "Error scraping Chitanka dictionary: {}", e),
        }

        result
    }

    fn name(&self) -> &'static str {
        "chitanka"
    }
}

fn browser_headers(config: &DictionaryConfig) -> Result<HeaderMap, ClientError> {
    let accept_language = HeaderValue::from_str(&config.accept_language)
        .map_err(|e| ClientError::InvalidConfig(format!("accept_language: {}", e)))?;

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(ACCEPT_LANGUAGE, accept_language);
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate, br"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    Ok(headers)
}

/// Map a transport failure onto its diagnostic class
fn classify_error(e: reqwest::Error) -> LookupError {
    let message = error_chain(&e);
    if e.is_timeout() {
        LookupError::Timeout { message }
    } else if e.is_connect() {
        LookupError::Unreachable { message }
    } else if message.to_lowercase().contains("reset") {
        LookupError::Timeout { message }
    } else {
        LookupError::Transport { message }
    }
}

fn error_chain(e: &reqwest::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
