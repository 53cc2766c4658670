use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use super::{Monitor, absorb_malformed, unavailable};
use crate::errors::MonitorError;
use crate::normalize::normalize;
use crate::records::{IssueRecord, parse_timestamp};
use crate::responses::RecentIssuesResponse;
use crate::upstream::{IssueQuery, StatsPeriod};

/// Issues kept by a time-window filter, plus the number discarded for a
/// missing or unparsable `lastSeen`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowFilter {
    pub issues: Vec<IssueRecord>,
    pub dropped: usize,
}

/// Keep issues whose `lastSeen` falls in `[now - minutes, now]`, in upstream
/// order, truncated to `ceiling`.
#[must_use]
pub fn filter_window(
    items: &[Value],
    now: DateTime<Utc>,
    minutes: i64,
    ceiling: usize,
) -> WindowFilter {
    let start = Duration::try_minutes(minutes)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    let mut issues = Vec::new();
    let mut dropped = 0usize;
    let mut outside = 0usize;

    for item in items {
        let Some(last_seen) = item.get("lastSeen").and_then(parse_timestamp) else {
            dropped += 1;
            continue;
        };
        if last_seen < start || last_seen > now {
            outside += 1;
            continue;
        }
        match IssueRecord::project(item, last_seen) {
            Some(record) => issues.push(record),
            None => dropped += 1,
        }
    }

    let matched = issues.len();
    issues.truncate(ceiling);

    if dropped > 0 {
        tracing::warn!(dropped, "dropped issues with missing or unparsable lastSeen");
    }
    tracing::debug!(
        received = items.len(),
        matched,
        outside,
        kept = issues.len(),
        ceiling,
        "filtered issues by time window"
    );

    WindowFilter { issues, dropped }
}

impl Monitor {
    /// Issues seen in the last `time_range_minutes` for a project.
    ///
    /// # Errors
    ///
    /// [`MonitorError::ProjectNotFound`] when the name cannot be resolved,
    /// [`MonitorError::InvalidWindow`] for a non-positive window, and
    /// [`MonitorError::UpstreamUnavailable`] when the API call fails.
    pub async fn get_recent_issues(
        &self,
        project_name: &str,
        time_range_minutes: i64,
    ) -> Result<RecentIssuesResponse, MonitorError> {
        self.get_recent_issues_at(project_name, time_range_minutes, Utc::now())
            .await
    }

    /// [`get_recent_issues`](Self::get_recent_issues) against an explicit clock.
    ///
    /// # Errors
    ///
    /// See [`get_recent_issues`](Self::get_recent_issues).
    pub async fn get_recent_issues_at(
        &self,
        project_name: &str,
        time_range_minutes: i64,
        now: DateTime<Utc>,
    ) -> Result<RecentIssuesResponse, MonitorError> {
        tracing::info!(project = project_name, minutes = time_range_minutes, "get_recent_issues");

        let project = self.resolve_project(project_name).await?;
        let window = self.policy.classify(time_range_minutes)?;

        let items = self
            .fetch_issue_items(&project.slug, window.ceiling, time_range_minutes)
            .await?;
        let filtered = filter_window(&items, now, time_range_minutes, window.ceiling);

        tracing::info!(
            project = project.slug.as_str(),
            tier = window.tier.as_str(),
            window = window.label.as_str(),
            received = items.len(),
            kept = filtered.issues.len(),
            dropped = filtered.dropped,
            "recent issues ready"
        );

        Ok(RecentIssuesResponse {
            project_name: project.display_name,
            project_slug: project.slug,
            resolution_method: project.reference.resolution_method,
            time_range_minutes,
            time_range_display: window.label,
            monitoring_type: window.tier,
            issues_count: filtered.issues.len(),
            dropped_count: filtered.dropped,
            issues: filtered.issues,
        })
    }

    /// One bounded issue-listing request, normalized.
    pub(super) async fn fetch_issue_items(
        &self,
        project_slug: &str,
        limit: usize,
        minutes: i64,
    ) -> Result<Vec<Value>, MonitorError> {
        let query = IssueQuery {
            limit,
            stats_period: StatsPeriod::covering(minutes),
        };
        let payload = absorb_malformed(
            self.api.list_project_issues(project_slug, query).await,
            "list_project_issues",
        )
        .map_err(unavailable)?;
        Ok(normalize(payload))
    }
}
