//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed working directories and env vars.

use figment::Jail;
use pretty_assertions::assert_eq;
use smcp_config::{AppConfig, ConfigOverrides};

#[test]
fn loads_project_config_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".sentry-mcp")?;
        jail.create_file(
            ".sentry-mcp/config.toml",
            r#"
[sentry]
api_token = "sntrys_toml"
organization = "acme"
host = "https://sentry.acme.dev"
request_timeout_secs = 10

[model]
name = "openai/gpt-4o"
timeout_secs = 5

[monitoring]
recent_max_minutes = 240
extended_limit = 25
"#,
        )?;

        let config = AppConfig::load(&ConfigOverrides::default()).expect("config loads");
        assert_eq!(config.sentry.api_token, "sntrys_toml");
        assert_eq!(config.sentry.organization, "acme");
        assert_eq!(config.sentry.api_base(), "https://sentry.acme.dev/api/0");
        assert_eq!(config.sentry.request_timeout_secs, 10);
        assert_eq!(config.model.request_model(), "gpt-4o");
        assert_eq!(config.model.timeout_secs, 5);
        assert_eq!(config.monitoring.recent_max_minutes, 240);
        assert_eq!(config.monitoring.extended_limit, 25);
        assert_eq!(config.monitoring.real_time_limit, 100);
        assert!(config.validate().is_ok());
        Ok(())
    });
}

#[test]
fn missing_files_fall_back_to_defaults() {
    Jail::expect_with(|_jail| {
        let config = AppConfig::load(&ConfigOverrides::default()).expect("config loads");
        assert_eq!(config.sentry.host, "https://sentry.io");
        assert_eq!(config.model.name, "gpt-4o-mini");
        assert_eq!(config.monitoring.real_time_max_minutes, 30);
        Ok(())
    });
}

#[test]
fn malformed_toml_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_dir(".sentry-mcp")?;
        jail.create_file(
            ".sentry-mcp/config.toml",
            "[monitoring]\nrecent_limit = \"lots\"\n",
        )?;
        let err = AppConfig::load(&ConfigOverrides::default()).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
        Ok(())
    });
}

#[test]
fn inconsistent_tiers_fail_validation() {
    Jail::expect_with(|jail| {
        jail.create_dir(".sentry-mcp")?;
        jail.create_file(
            ".sentry-mcp/config.toml",
            r#"
[sentry]
api_token = "t"
organization = "acme"

[monitoring]
real_time_max_minutes = 200
"#,
        )?;
        let config = AppConfig::load(&ConfigOverrides::default()).expect("config loads");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("monitoring.recent_max_minutes"));
        Ok(())
    });
}
