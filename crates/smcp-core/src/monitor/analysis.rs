use serde_json::Value;

use super::{Monitor, absorb_malformed, issue_error};
use crate::errors::MonitorError;
use crate::normalize::normalize;
use crate::records::{count_field, parse_timestamp, string_field};
use crate::responses::{IssueAnalysisResponse, IssueMetadata};

/// Events requested when counting an issue's recent events.
const RECENT_EVENTS_LIMIT: usize = 100;

impl Monitor {
    /// Minimal-field detail for one issue plus its latest event's message
    /// and release.
    ///
    /// # Errors
    ///
    /// [`MonitorError::IssueNotFound`] when the issue does not exist and
    /// [`MonitorError::UpstreamUnavailable`] when the detail lookup fails.
    /// Latest-event and event-list failures only leave their fields empty.
    pub async fn get_issue_analysis(
        &self,
        issue_id: &str,
    ) -> Result<IssueAnalysisResponse, MonitorError> {
        tracing::info!(issue_id, "get_issue_analysis");

        let details = absorb_malformed(self.api.issue_details(issue_id).await, "issue_details")
            .map_err(|error| issue_error(issue_id, error))?;

        let latest_event = match self.api.issue_latest_event(issue_id).await {
            Ok(event) => Some(event),
            Err(error) => {
                tracing::warn!(issue_id, %error, "latest event unavailable");
                None
            }
        };

        let recent_events_count = match self.api.issue_events(issue_id, RECENT_EVENTS_LIMIT).await
        {
            Ok(events) => Some(normalize(events).len()),
            Err(error) => {
                tracing::warn!(issue_id, %error, "issue events unavailable");
                None
            }
        };

        let metadata = details.get("metadata").map_or_else(IssueMetadata::default, |m| {
            IssueMetadata {
                filename: string_field(m, "filename"),
                function: string_field(m, "function"),
                error_type: string_field(m, "type"),
            }
        });

        Ok(IssueAnalysisResponse {
            issue_id: issue_id.to_string(),
            short_id: string_field(&details, "shortId"),
            title: string_field(&details, "title"),
            culprit: string_field(&details, "culprit"),
            level: string_field(&details, "level"),
            status: string_field(&details, "status"),
            priority: string_field(&details, "priority"),
            count: count_field(&details, "count"),
            user_count: count_field(&details, "userCount"),
            first_seen: details.get("firstSeen").and_then(parse_timestamp),
            last_seen: details.get("lastSeen").and_then(parse_timestamp),
            assigned_to: assignee(details.get("assignedTo")),
            permalink: string_field(&details, "permalink"),
            metadata,
            error_message: latest_event.as_ref().and_then(event_message),
            release_version: latest_event.as_ref().and_then(event_release),
            recent_events_count,
        })
    }
}

fn assignee(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(name) => Some(name.clone()),
        actor @ Value::Object(_) => {
            string_field(actor, "name").or_else(|| string_field(actor, "email"))
        }
        _ => None,
    }
}

/// Event message, falling back to the event title when the message is empty.
fn event_message(event: &Value) -> Option<String> {
    string_field(event, "message")
        .filter(|m| !m.is_empty())
        .or_else(|| string_field(event, "title"))
}

fn event_release(event: &Value) -> Option<String> {
    match event.get("release")? {
        Value::String(version) => Some(version.clone()),
        release @ Value::Object(_) => string_field(release, "version"),
        _ => None,
    }
}
