//! Per-client settings.
//!
//! # Design
//! `ClientConfig` is plain data handed to `RestClient` at construction. The
//! base URL is normalized once here so request building can always join it
//! with a single `/`. The timeout is passed through to the transport and is
//! never retried.

use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for a `RestClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Stored without a trailing slash.
    pub base_url: String,
    /// Attach the captured auth cookie to every request.
    pub requires_auth: bool,
    /// Global timeout per round trip; `None` waits forever.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            requires_auth: false,
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    pub fn with_auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}
