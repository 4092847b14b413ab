//! Client configuration for bloom front ends.
//!
//! Resolves the remote API base URL and the guest data directory from the
//! environment. Values are optional: a missing API URL means guest-only
//! operation, a missing data directory falls back to the platform default
//! chosen by the caller.

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Environment variable naming the remote note service base URL.
pub const API_URL_ENV: &str = "BLOOM_API_URL";
/// Environment variable overriding the guest data directory.
pub const DATA_DIR_ENV: &str = "BLOOM_DATA_DIR";

/// Resolved client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the remote note service, if configured.
    pub api_base_url: Option<String>,
    /// Directory holding guest-store data, if overridden.
    pub data_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        let api_base_url = match normalize_text_option(env::var(API_URL_ENV).ok()) {
            Some(url) => Some(validate_base_url(url)?),
            None => None,
        };
        let data_dir = normalize_text_option(env::var(DATA_DIR_ENV).ok()).map(PathBuf::from);
        Ok(Self {
            api_base_url,
            data_dir,
        })
    }
}

/// Validate and normalize an API base URL: must carry an http(s) scheme,
/// trailing slashes are stripped.
pub fn validate_base_url(raw: impl Into<String>) -> Result<String> {
    let url = normalize_text_option(Some(raw.into()))
        .ok_or_else(|| Error::InvalidInput("API base URL must not be empty".to_string()))?;
    if is_http_url(&url) {
        Ok(url.trim_end_matches('/').to_string())
    } else {
        Err(Error::InvalidInput(
            "API base URL must include http:// or https://".to_string(),
        ))
    }
}

/// Normalize optional text by trimming whitespace and removing empties.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Check if a string starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}
