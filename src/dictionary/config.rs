// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the upstream dictionary client

use std::env;
use std::time::Duration;
use url::Url;

/// Default upstream dictionary origin
pub const DEFAULT_BASE_URL: &str = "https://rechnik.chitanka.info";

/// Default upstream request timeout (15 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Browser User-Agent; the site degrades responses for unknown clients
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Configuration for [`ChitankaClient`](super::client::ChitankaClient)
#[derive(Debug, Clone)]
pub struct DictionaryConfig {
    /// Upstream origin, per-word pages live under `/w/`
    pub base_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// User-Agent header sent upstream
    pub user_agent: String,
    /// Accept-Language header sent upstream
    pub accept_language: String,
}

impl DictionaryConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("CHITANKA_BASE_URL").unwrap_or(defaults.base_url),
            timeout_ms: env::var("CHITANKA_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_ms),
            user_agent: env::var("CHITANKA_USER_AGENT").unwrap_or(defaults.user_agent),
            accept_language: defaults.accept_language,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("base_url is not a valid URL: {}", e))?;
        if !["http", "https"].contains(&url.scheme()) {
            return Err(format!("base_url must be http or https, got {}", url.scheme()));
        }
        if self.timeout_ms == 0 {
            return Err("timeout_ms must be at least 1".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent cannot be empty".to_string());
        }
        Ok(())
    }

    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "bg,en-US;q=0.7,en;q=0.3".to_string(),
        }
    }
}
