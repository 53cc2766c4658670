//! One-shot operator commands: run a single monitoring operation and print it.

use smcp_core::Monitor;

use crate::cli::{Commands, GlobalFlags};
use crate::output::output;

pub async fn dispatch(command: Commands, monitor: &Monitor, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Serve => crate::mcp::serve(monitor.clone()).await,
        Commands::Health { project } => {
            output(&monitor.get_project_health(&project).await?, flags.format)
        }
        Commands::Issues { project, minutes } => output(
            &monitor.get_recent_issues(&project, minutes).await?,
            flags.format,
        ),
        Commands::Analyze { issue_id } => {
            output(&monitor.get_issue_analysis(&issue_id).await?, flags.format)
        }
        Commands::Trends { issue_id } => {
            output(&monitor.get_issue_trends(&issue_id).await?, flags.format)
        }
    }
}
