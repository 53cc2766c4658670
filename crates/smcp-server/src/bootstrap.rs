use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use smcp_client::{ChatMatcher, DisabledMatcher, SentryClient};
use smcp_config::AppConfig;
use smcp_core::{Monitor, ProjectMatcher};

use crate::cli::GlobalFlags;

/// Load and validate configuration, with CLI flags as the top layer.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<AppConfig> {
    let config = AppConfig::load_with_dotenv(&flags.config_overrides())
        .context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Wire the HTTP clients into a [`Monitor`].
pub fn build_monitor(config: &AppConfig) -> anyhow::Result<Monitor> {
    let api = SentryClient::new(&config.sentry).context("failed to build Sentry client")?;

    let matcher: Arc<dyn ProjectMatcher> = if config.model.is_configured() {
        Arc::new(ChatMatcher::new(&config.model).context("failed to build model client")?)
    } else {
        tracing::warn!(
            "no model API key configured; project names will only match exactly or case-insensitively"
        );
        Arc::new(DisabledMatcher)
    };

    tracing::info!(
        organization = %config.sentry.organization,
        api_base = %config.sentry.api_base(),
        model = ?config.model.is_configured().then(|| config.model.request_model()),
        "sentry monitor ready"
    );

    Ok(Monitor::new(
        Arc::new(api),
        matcher,
        config.monitoring.to_tier_policy(),
        Duration::from_secs(config.model.timeout_secs),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monitor_builds_without_model_key() {
        let mut config = AppConfig::default();
        config.sentry.api_token = "sntrys_test".into();
        config.sentry.organization = "acme".into();
        config.monitoring.recent_limit = 40;

        let monitor = build_monitor(&config).expect("monitor builds");
        assert_eq!(monitor.policy().recent_limit, 40);
    }
}
