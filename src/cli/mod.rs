// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

use crate::api::{fail, ok, serve, ApiConfig};
use crate::dictionary::{
    validate_text, ChitankaClient, DictionaryConfig, DictionarySource, LookupError,
};
use crate::version;

/// Chitanka Dictionary API
///
/// Flags override the matching environment variables (`PORT`,
/// `CHITANKA_BASE_URL`, ...), which override the built-in defaults.
#[derive(Parser, Debug)]
#[command(name = "chitanka-dictionary-api")]
#[command(version)]
#[command(about = "HTTP API for looking up Bulgarian words on rechnik.chitanka.info", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server options used when no subcommand is given
    #[command(flatten)]
    pub serve: ServeArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve(ServeArgs),

    /// Look up a single word and print the JSON envelope
    Lookup(LookupArgs),
}

/// Options for the upstream dictionary site
#[derive(Args, Debug, Clone, Default)]
pub struct UpstreamArgs {
    /// Upstream origin
    #[arg(long)]
    pub base_url: Option<String>,

    /// Upstream request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// User-Agent sent upstream
    #[arg(long)]
    pub user_agent: Option<String>,
}

impl UpstreamArgs {
    pub fn to_config(&self) -> DictionaryConfig {
        let mut config = DictionaryConfig::from_env();
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        config
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Listen host
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Requests allowed per client within the window
    #[arg(long)]
    pub rate_limit_max: Option<u32>,

    /// Rate limit window in seconds
    #[arg(long)]
    pub rate_limit_window_secs: Option<u64>,

    /// Markdown file served at `/`
    #[arg(long)]
    pub docs_path: Option<PathBuf>,

    /// Key clients by the first X-Forwarded-For entry
    #[arg(long)]
    pub trust_forwarded_for: bool,

    #[command(flatten)]
    pub upstream: UpstreamArgs,
}

impl ServeArgs {
    pub fn to_config(&self) -> ApiConfig {
        let mut config = ApiConfig::from_env();
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(max) = self.rate_limit_max {
            config.rate_limit_max = max;
        }
        if let Some(secs) = self.rate_limit_window_secs {
            config.rate_limit_window_secs = secs;
        }
        if let Some(path) = &self.docs_path {
            config.docs_path = path.clone();
        }
        if self.trust_forwarded_for {
            config.trust_forwarded_for = true;
        }
        config
    }
}

#[derive(Args, Debug, Clone)]
pub struct LookupArgs {
    /// Word to look up
    pub word: String,

    #[command(flatten)]
    pub upstream: UpstreamArgs,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<ExitCode> {
    match cli.command.unwrap_or(Commands::Serve(cli.serve)) {
        Commands::Serve(args) => run_server(args).await,
        Commands::Lookup(args) => run_lookup(args).await,
    }
}

async fn run_server(args: ServeArgs) -> Result<ExitCode> {
    info!("Starting {}", version::get_version_string());

    let client = ChitankaClient::new(args.upstream.to_config())
        .context("failed to create dictionary client")?;
    serve(args.to_config(), Arc::new(client))
        .await
        .context("server failed")?;

    Ok(ExitCode::SUCCESS)
}

async fn run_lookup(args: LookupArgs) -> Result<ExitCode> {
    let client = ChitankaClient::new(args.upstream.to_config())
        .context("failed to create dictionary client")?;

    if let Err(e) = validate_text(&args.word) {
        print_json(&fail(e.to_string(), 400))?;
        return Ok(ExitCode::FAILURE);
    }

    match client.lookup(&args.word).await {
        Ok(entry) => {
            print_json(&ok(entry))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            let not_found = LookupError::not_found(&args.word);
            tracing::debug!(kind = e.kind(), "lookup failed");
            print_json(&fail(not_found.to_string(), 404))?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize response")?;
    println!("{}", json);
    Ok(())
}
