use chrono::Utc;
use serde_json::Value;

use super::{Monitor, absorb_malformed, unavailable};
use crate::errors::{ApiError, MonitorError};
use crate::records::string_field;
use crate::responses::ProjectHealthResponse;

/// Window used for the health summary's recent-issue count.
const HEALTH_WINDOW_MINUTES: i64 = 24 * 60;

/// Issues requested for the health summary.
const HEALTH_ISSUE_LIMIT: usize = 100;

impl Monitor {
    /// Status, platform, latest release, and 24-hour issue count for a project.
    ///
    /// # Errors
    ///
    /// [`MonitorError::ProjectNotFound`] when the name cannot be resolved and
    /// [`MonitorError::UpstreamUnavailable`] when an API call fails.
    pub async fn get_project_health(
        &self,
        project_name: &str,
    ) -> Result<ProjectHealthResponse, MonitorError> {
        tracing::info!(project = project_name, "get_project_health");
        let project = self.resolve_project(project_name).await?;

        let details = absorb_malformed(
            self.api.project_details(&project.slug).await,
            "project_details",
        )
        .map_err(|error| match error {
            ApiError::NotFound(_) => MonitorError::ProjectNotFound {
                query: project_name.to_string(),
                suggestions: project.alternatives.clone(),
            },
            other => unavailable(other),
        })?;

        let items = self
            .fetch_issue_items(&project.slug, HEALTH_ISSUE_LIMIT, HEALTH_WINDOW_MINUTES)
            .await?;
        let recent = super::filter_window(&items, Utc::now(), HEALTH_WINDOW_MINUTES, HEALTH_ISSUE_LIMIT);

        Ok(ProjectHealthResponse {
            project_name: project.display_name,
            project_slug: project.slug,
            resolution_method: project.reference.resolution_method,
            health_status: string_field(&details, "status").unwrap_or_else(|| "unknown".into()),
            platform: string_field(&details, "platform"),
            date_created: string_field(&details, "dateCreated"),
            latest_release: release_version(details.get("latestRelease")),
            recent_issues_count: recent.issues.len(),
        })
    }
}

/// `latestRelease` is either a version string or an object carrying `version`.
fn release_version(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(version) => Some(version.clone()),
        release @ Value::Object(_) => string_field(release, "version"),
        _ => None,
    }
}
