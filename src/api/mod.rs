// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod docs;
pub mod errors;
pub mod handlers;
pub mod http_server;
pub mod rate_limiter;
pub mod response_formatter;
pub mod server;

pub use errors::ApiError;
pub use handlers::{HealthStatus, LookupQuery};
pub use http_server::{create_app, AppState};
pub use rate_limiter::ClientRateLimiter;
pub use response_formatter::{fail, ok, ErrorEnvelope, SuccessEnvelope};
pub use server::{serve, ApiConfig, ServerError};
