//! Client configuration.

use std::fmt;

use url::Url;

use pinup_core::constants::{DEFAULT_TIMEOUT_SECS, PINATA_API_URL};
use pinup_core::error::{PinupError, Result};

/// Pinata client configuration.
///
/// Built once at startup and handed to [`PinataClient::new`](crate::PinataClient::new).
/// Credentials are passed through as-is; empty values are rejected by the
/// service, not here.
#[derive(Clone)]
pub struct PinataConfig {
    /// Pinata API key
    pub api_key: String,
    /// Pinata API secret
    pub secret_api_key: String,
    /// Base URL of the pinning API (e.g. "https://api.pinata.cloud")
    pub api_url: String,
    /// Request timeout in seconds (0 disables the timeout)
    pub timeout_seconds: u64,
}

impl PinataConfig {
    /// Creates a config for the public Pinata API.
    pub fn new(api_key: impl Into<String>, secret_api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_api_key: secret_api_key.into(),
            api_url: PINATA_API_URL.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Points the client at a different API base URL.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Resolves an API path against the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        let raw = format!("{}{}", self.api_url.trim_end_matches('/'), path);
        let url = Url::parse(&raw)
            .map_err(|e| PinupError::Config(format!("invalid API URL '{}': {}", raw, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(PinupError::Config(format!(
                "unsupported URL scheme '{}' in '{}'",
                other, raw
            ))),
        }
    }
}

// Secrets stay out of logs.
impl fmt::Debug for PinataConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinataConfig")
            .field("api_key", &redact(&self.api_key))
            .field("secret_api_key", &redact(&self.secret_api_key))
            .field("api_url", &self.api_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "<empty>"
    } else {
        "<redacted>"
    }
}
