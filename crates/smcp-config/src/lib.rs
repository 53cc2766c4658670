//! # smcp-config
//!
//! Layered configuration loading for the Sentry MCP server using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Command-line arguments ([`ConfigOverrides`])
//! 2. Well-known environment variables (`SENTRY_API_TOKEN`, `SENTRY_ORG`,
//!    `SENTRY_HOST`, `OPENAI_API_KEY`, `SENTRY_MCP_MODEL`)
//! 3. Prefixed environment variables (`SENTRY_MCP_*`, `__` as separator)
//! 4. Project-level `.sentry-mcp/config.toml`
//! 5. User-level `~/.config/sentry-mcp/config.toml`
//! 6. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SENTRY_MCP_SENTRY__ORGANIZATION` -> `sentry.organization`,
//! `SENTRY_MCP_MONITORING__RECENT_LIMIT` -> `monitoring.recent_limit`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use smcp_config::{AppConfig, ConfigOverrides};
//!
//! let config = AppConfig::load_with_dotenv(&ConfigOverrides::default()).expect("config");
//! config.validate().expect("valid config");
//! println!("Sentry API: {}", config.sentry.api_base());
//! ```

mod error;
mod model;
mod monitoring;
mod sentry;

pub use error::ConfigError;
pub use model::ModelConfig;
pub use monitoring::MonitoringConfig;
pub use sentry::SentryConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Variables read without the `SENTRY_MCP_` prefix, and the key each fills.
const WELL_KNOWN_ENV: &[(&str, &str)] = &[
    ("SENTRY_API_TOKEN", "sentry.api_token"),
    ("SENTRY_ORG", "sentry.organization"),
    ("SENTRY_HOST", "sentry.host"),
    ("OPENAI_API_KEY", "model.api_key"),
    ("SENTRY_MCP_MODEL", "model.name"),
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub sentry: SentryConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

/// Values given explicitly on the command line. `None` leaves the lower
/// layers untouched.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub sentry_api_token: Option<String>,
    pub sentry_org: Option<String>,
    pub sentry_host: Option<String>,
    pub model: Option<String>,
    pub openai_api_key: Option<String>,
}

impl ConfigOverrides {
    fn pairs(&self) -> [(&'static str, Option<&String>); 5] {
        [
            ("sentry.api_token", self.sentry_api_token.as_ref()),
            ("sentry.organization", self.sentry_org.as_ref()),
            ("sentry.host", self.sentry_host.as_ref()),
            ("model.name", self.model.as_ref()),
            ("model.api_key", self.openai_api_key.as_ref()),
        ]
    }
}

impl AppConfig {
    /// Load configuration from all sources (TOML files, environment, CLI).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env`
    /// support. The result is not validated, see [`Self::validate`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::Figment`] when a source cannot be parsed or a value has
    /// the wrong type.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        Self::figment(overrides).extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(error) if error.not_found() => {}
            Err(error) => tracing::warn!(%error, "ignoring unreadable .env"),
        }
        Self::load(overrides)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on
    /// top.
    pub fn figment(overrides: &ConfigOverrides) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path().filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".sentry-mcp/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment = figment
            .merge(
                Env::prefixed("SENTRY_MCP_")
                    .ignore(&["MODEL", "LOG"])
                    .split("__"),
            )
            .merge(Self::well_known_env());

        for (key, value) in overrides.pairs() {
            if let Some(value) = value {
                figment = figment.merge(Serialized::default(key, value));
            }
        }

        figment
    }

    /// Check the fields every tool call depends on.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotConfigured`] for a missing token or organization and
    /// [`ConfigError::InvalidValue`] for an inconsistent tier policy or a zero
    /// timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sentry.api_token.is_empty() {
            return Err(ConfigError::NotConfigured {
                field: "sentry.api_token".into(),
            });
        }
        if self.sentry.organization.is_empty() {
            return Err(ConfigError::NotConfigured {
                field: "sentry.organization".into(),
            });
        }
        for (field, secs) in [
            ("sentry.request_timeout_secs", self.sentry.request_timeout_secs),
            ("model.timeout_secs", self.model.timeout_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    reason: "must be at least 1 second".into(),
                });
            }
        }
        self.monitoring.validate()
    }

    fn well_known_env() -> Env {
        let names: Vec<&str> = WELL_KNOWN_ENV.iter().map(|(name, _)| *name).collect();
        Env::raw().only(&names).map(|key| {
            WELL_KNOWN_ENV
                .iter()
                .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
                .map_or_else(
                    || key.as_str().to_ascii_lowercase().into(),
                    |(_, path)| (*path).into(),
                )
        })
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sentry-mcp").join("config.toml"))
    }
}
