// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Uniform response envelopes
//!
//! Every response body is either a [`SuccessEnvelope`] or an
//! [`ErrorEnvelope`].

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// `{ success: true, data, timestamp }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuccessEnvelope<T> {
    pub success: bool,
    pub data: T,
    pub timestamp: String,
}

/// `{ success: false, error, code, timestamp }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
    pub code: u16,
    pub timestamp: String,
}

/// Current time as an RFC 3339 UTC timestamp with millisecond precision
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Wrap data in a success envelope
pub fn ok<T>(data: T) -> SuccessEnvelope<T> {
    SuccessEnvelope {
        success: true,
        data,
        timestamp: timestamp(),
    }
}

/// Wrap an error message and HTTP status code in an error envelope
pub fn fail(message: impl Into<String>, code: u16) -> ErrorEnvelope {
    ErrorEnvelope {
        success: false,
        error: message.into(),
        code,
        timestamp: timestamp(),
    }
}
