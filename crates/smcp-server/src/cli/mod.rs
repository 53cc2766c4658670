use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::{Commands, DEFAULT_WINDOW_MINUTES};

/// Top-level CLI parser for the `sentry-mcp` binary.
#[derive(Debug, Parser)]
#[command(
    name = "sentry-mcp",
    version,
    about = "Sentry monitoring tools over MCP: project health, recent issues, issue analysis, trends"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format for one-shot commands: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Sentry auth token (overrides SENTRY_API_TOKEN)
    #[arg(long, global = true)]
    pub sentry_api_token: Option<String>,

    /// Sentry organization slug (overrides SENTRY_ORG)
    #[arg(long, global = true)]
    pub sentry_org: Option<String>,

    /// Sentry host (overrides SENTRY_HOST)
    #[arg(long, global = true)]
    pub sentry_host: Option<String>,

    /// Model used for fuzzy project matching
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// API key for the matching model (overrides OPENAI_API_KEY)
    #[arg(long, global = true)]
    pub openai_api_key: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            sentry_api_token: self.sentry_api_token.clone(),
            sentry_org: self.sentry_org.clone(),
            sentry_host: self.sentry_host.clone(),
            model: self.model.clone(),
            openai_api_key: self.openai_api_key.clone(),
        }
    }
}
