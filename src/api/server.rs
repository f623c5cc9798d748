// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use super::http_server::{create_app, AppState};
use crate::dictionary::DictionarySource;
use crate::version;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_RATE_LIMIT_MAX: u32 = 150;
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;
pub const DEFAULT_DOCS_PATH: &str = "README.md";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Requests allowed per client within the window
    pub rate_limit_max: u32,
    pub rate_limit_window_secs: u64,
    /// Key clients by the first `X-Forwarded-For` entry instead of the peer address
    pub trust_forwarded_for: bool,
    /// Markdown file rendered at `/`
    pub docs_path: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            rate_limit_max: DEFAULT_RATE_LIMIT_MAX,
            rate_limit_window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS,
            trust_forwarded_for: false,
            docs_path: PathBuf::from(DEFAULT_DOCS_PATH),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: env_parse("PORT").unwrap_or(defaults.port),
            rate_limit_max: env_parse("RATE_LIMIT_MAX").unwrap_or(defaults.rate_limit_max),
            rate_limit_window_secs: env_parse("RATE_LIMIT_WINDOW_SECS")
                .unwrap_or(defaults.rate_limit_window_secs),
            trust_forwarded_for: std::env::var("TRUST_FORWARDED_FOR")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.trust_forwarded_for),
            docs_path: std::env::var("DOCS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.docs_path),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("host must not be empty".to_string());
        }
        if self.rate_limit_max == 0 {
            return Err("rate_limit_max must be greater than 0".to_string());
        }
        if self.rate_limit_window_secs == 0 {
            return Err("rate_limit_window_secs must be greater than 0".to_string());
        }
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host.trim(), self.port)
            .parse()
            .map_err(|e| format!("invalid listen address {}:{}: {}", self.host, self.port, e))
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid server configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Run the HTTP server until Ctrl+C or SIGTERM
pub async fn serve(config: ApiConfig, source: Arc<dyn DictionarySource>) -> Result<(), ServerError> {
    config.validate().map_err(ServerError::InvalidConfig)?;
    let addr = config.listen_addr().map_err(ServerError::InvalidConfig)?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    info!(
        "🚀 Chitanka Dictionary API v{} listening on {}",
        version::VERSION,
        addr
    );
    info!("📖 Documentation: http://localhost:{}", config.port);
    info!(
        "🔍 Example lookup: http://localhost:{}/api?word=тест",
        config.port
    );
    info!(
        "Rate limit: {} requests per {}s per client (source: {})",
        config.rate_limit_max,
        config.rate_limit_window_secs,
        source.name()
    );

    let app = create_app(AppState::new(source, config));

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(ServerError::Serve)?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "failed to capture Ctrl+C signal");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(error) => {
                warn!(%error, "failed to capture SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = sigterm => info!("Received SIGTERM, shutting down"),
    }
}
