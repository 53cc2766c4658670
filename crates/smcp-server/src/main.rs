use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod mcp;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("sentry-mcp error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();
    init_tracing(flags.log_level())?;

    let config = bootstrap::load_config(&flags)?;
    let monitor = bootstrap::build_monitor(&config)?;

    let command = cli.command.unwrap_or(cli::Commands::Serve);
    commands::dispatch(command, &monitor, &flags).await
}

/// Logs go to stderr; stdout carries the MCP stdio transport.
fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("SENTRY_MCP_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
