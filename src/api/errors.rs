// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::{header::RETRY_AFTER, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;

use super::response_formatter::{fail, ErrorEnvelope};

pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Endpoint not found";
pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please try again later.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const DOCS_UNAVAILABLE_MESSAGE: &str = "Could not load documentation";

#[derive(Debug, Clone)]
pub enum ApiError {
    /// Input failed validation; the message goes to the client verbatim
    InvalidRequest(String),
    /// Lookup produced no entry
    NotFound(String),
    /// No route matched the request
    RouteNotFound,
    RateLimitExceeded {
        retry_after: u64,
    },
    DocumentationUnavailable,
    /// Unexpected failure; the detail is logged, never sent to the client
    InternalError(String),
}

impl ApiError {
    pub fn to_response(&self) -> ErrorEnvelope {
        let message = match self {
            ApiError::InvalidRequest(msg) | ApiError::NotFound(msg) => msg.clone(),
            ApiError::RouteNotFound => ROUTE_NOT_FOUND_MESSAGE.to_string(),
            ApiError::RateLimitExceeded { .. } => RATE_LIMITED_MESSAGE.to_string(),
            ApiError::DocumentationUnavailable => DOCS_UNAVAILABLE_MESSAGE.to_string(),
            ApiError::InternalError(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        };

        fail(message, self.status_code())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidRequest(_) => 400,
            ApiError::NotFound(_) | ApiError::RouteNotFound => 404,
            ApiError::RateLimitExceeded { .. } => 429,
            ApiError::DocumentationUnavailable | ApiError::InternalError(_) => 500,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::RouteNotFound => write!(f, "{}", ROUTE_NOT_FOUND_MESSAGE),
            ApiError::RateLimitExceeded { retry_after } => write!(
                f,
                "Rate limit exceeded, retry after {} seconds",
                retry_after
            ),
            ApiError::DocumentationUnavailable => write!(f, "{}", DOCS_UNAVAILABLE_MESSAGE),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::InternalError(detail) = &self {
            tracing::error!("Internal error: {}", detail);
        }

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self.to_response())).into_response();

        if let ApiError::RateLimitExceeded { retry_after } = self {
            if let Ok(value) = HeaderValue::from_str(&retry_after.max(1).to_string()) {
                response.headers_mut().insert(RETRY_AFTER, value);
            }
        }

        response
    }
}
