//! Sentry API configuration.

use serde::{Deserialize, Serialize};

/// Default Sentry host.
fn default_host() -> String {
    "https://sentry.io".to_string()
}

/// Default per-request timeout in seconds.
const fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SentryConfig {
    /// Auth token with `project:read` and `event:read` scopes.
    #[serde(default)]
    pub api_token: String,

    /// Organization slug the projects belong to.
    #[serde(default)]
    pub organization: String,

    /// Sentry host, `https://sentry.io` unless self-hosted.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            organization: String::new(),
            host: default_host(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl SentryConfig {
    /// Token and organization are both present.
    pub fn is_configured(&self) -> bool {
        !self.api_token.is_empty() && !self.organization.is_empty()
    }

    /// REST base URL, e.g. `https://sentry.io/api/0`.
    pub fn api_base(&self) -> String {
        format!("{}/api/0", self.host.trim_end_matches('/'))
    }
}
