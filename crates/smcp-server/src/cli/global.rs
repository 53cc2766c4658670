use clap::ValueEnum;
use smcp_config::ConfigOverrides;

/// Output mode for the one-shot commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Compact single-line JSON.
    Raw,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub sentry_api_token: Option<String>,
    pub sentry_org: Option<String>,
    pub sentry_host: Option<String>,
    pub model: Option<String>,
    pub openai_api_key: Option<String>,
}

impl GlobalFlags {
    /// Default log filter when `SENTRY_MCP_LOG` is unset. Quiet wins over verbose.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Command-line values that outrank every other configuration source.
    #[must_use]
    pub fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            sentry_api_token: self.sentry_api_token.clone(),
            sentry_org: self.sentry_org.clone(),
            sentry_host: self.sentry_host.clone(),
            model: self.model.clone(),
            openai_api_key: self.openai_api_key.clone(),
        }
    }
}
