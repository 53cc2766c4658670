use clap::Subcommand;

/// Default window for `issues` and the `get_recent_issues` tool.
pub const DEFAULT_WINDOW_MINUTES: i64 = 60;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the MCP server over stdio (the default when no command is given)
    Serve,

    /// Health summary for a project: status, platform, latest release, 24h issue count
    Health {
        /// Project name or slug (matched exactly, then case-insensitively, then by model)
        project: String,
    },

    /// Issues seen in the last N minutes for a project
    Issues {
        /// Project name or slug
        project: String,

        /// Window length in minutes
        #[arg(short, long, default_value_t = DEFAULT_WINDOW_MINUTES, allow_negative_numbers = true)]
        minutes: i64,
    },

    /// Detailed analysis of one issue
    Analyze {
        /// Sentry issue id
        issue_id: String,
    },

    /// Hourly and daily event trends for one issue
    Trends {
        /// Sentry issue id
        issue_id: String,
    },
}
