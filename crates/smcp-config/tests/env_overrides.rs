use figment::Jail;
use pretty_assertions::assert_eq;
use smcp_config::{AppConfig, ConfigOverrides};

#[test]
fn well_known_variables_fill_config() {
    Jail::expect_with(|jail| {
        jail.set_env("SENTRY_API_TOKEN", "sntrys_env");
        jail.set_env("SENTRY_ORG", "acme");
        jail.set_env("SENTRY_HOST", "https://self-hosted.example.com");
        jail.set_env("OPENAI_API_KEY", "sk-env");
        jail.set_env("SENTRY_MCP_MODEL", "openai/gpt-4o-mini");

        let config = AppConfig::load(&ConfigOverrides::default()).expect("config loads");
        assert_eq!(config.sentry.api_token, "sntrys_env");
        assert_eq!(config.sentry.organization, "acme");
        assert_eq!(config.sentry.host, "https://self-hosted.example.com");
        assert_eq!(config.model.api_key, "sk-env");
        assert_eq!(config.model.name, "openai/gpt-4o-mini");
        assert!(config.model.is_configured());
        Ok(())
    });
}

#[test]
fn prefixed_variables_reach_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("SENTRY_MCP_MONITORING__RECENT_LIMIT", "60");
        jail.set_env("SENTRY_MCP_SENTRY__REQUEST_TIMEOUT_SECS", "12");

        let config = AppConfig::load(&ConfigOverrides::default()).expect("config loads");
        assert_eq!(config.monitoring.recent_limit, 60);
        assert_eq!(config.sentry.request_timeout_secs, 12);
        Ok(())
    });
}

#[test]
fn well_known_variables_beat_config_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".sentry-mcp")?;
        jail.create_file(
            ".sentry-mcp/config.toml",
            "[sentry]\norganization = \"from-file\"\n",
        )?;
        jail.set_env("SENTRY_ORG", "from-env");

        let config = AppConfig::load(&ConfigOverrides::default()).expect("config loads");
        assert_eq!(config.sentry.organization, "from-env");
        Ok(())
    });
}

#[test]
fn command_line_beats_environment() {
    Jail::expect_with(|jail| {
        jail.set_env("SENTRY_ORG", "from-env");
        jail.set_env("SENTRY_API_TOKEN", "sntrys_env");
        let overrides = ConfigOverrides {
            sentry_org: Some("from-cli".into()),
            model: Some("gpt-4o".into()),
            ..Default::default()
        };

        let config = AppConfig::load(&overrides).expect("config loads");
        assert_eq!(config.sentry.organization, "from-cli");
        assert_eq!(config.sentry.api_token, "sntrys_env");
        assert_eq!(config.model.name, "gpt-4o");
        Ok(())
    });
}
