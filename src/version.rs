// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Chitanka Dictionary API

/// Semantic version number
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
pub const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("{} {}", PACKAGE_NAME, VERSION)
}
