//! Chat-completion model used for fuzzy project matching.

use serde::{Deserialize, Serialize};

fn default_name() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

/// Default bound on a single matching request, in seconds.
const fn default_timeout_secs() -> u64 {
    15
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// API key for the chat-completions endpoint. Empty disables matching.
    #[serde(default)]
    pub api_key: String,

    /// Model name. A provider prefix such as `openai/` is accepted.
    #[serde(default = "default_name")]
    pub name: String,

    /// OpenAI-compatible base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            name: default_name(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ModelConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Model name as sent to the endpoint, with any `openai/` prefix removed.
    pub fn request_model(&self) -> &str {
        self.name.strip_prefix("openai/").unwrap_or(&self.name)
    }

    /// Full chat-completions URL.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}
