//! Error types for the monitoring core.
//!
//! [`MonitorError`] is what tool callers see. [`ApiError`] and [`MatchError`]
//! are what the two collaborators report; the [`Monitor`](crate::Monitor)
//! maps them into the caller-facing taxonomy. A malformed upstream payload is
//! never surfaced as an error: it is logged and degraded to an empty result.

use thiserror::Error;

/// Errors returned by monitoring operations.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The requested time window is not a positive minute count.
    #[error("Invalid time window: {minutes} minutes (must be a positive number of minutes)")]
    InvalidWindow { minutes: i64 },

    /// No project matched after exact, case-insensitive, and model-assisted matching.
    #[error("{}", project_not_found_message(.query, .suggestions))]
    ProjectNotFound {
        query: String,
        suggestions: Vec<String>,
    },

    /// The tracking service has no issue with this id.
    #[error("Issue not found: {issue_id}")]
    IssueNotFound { issue_id: String },

    /// Network, timeout, or authentication failure talking to a collaborator.
    #[error("Upstream unavailable: {message}")]
    UpstreamUnavailable { message: String },
}

impl MonitorError {
    /// Stable snake_case tag for structured error payloads.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidWindow { .. } => "invalid_window",
            Self::ProjectNotFound { .. } => "project_not_found",
            Self::IssueNotFound { .. } => "issue_not_found",
            Self::UpstreamUnavailable { .. } => "upstream_unavailable",
        }
    }

    /// Whether the caller may reasonably retry the same request later.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable { .. })
    }

    /// Candidate project names worth showing alongside the error, if any.
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::ProjectNotFound { suggestions, .. } => suggestions,
            _ => &[],
        }
    }
}

fn project_not_found_message(query: &str, suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        format!("No project found matching '{query}'")
    } else {
        format!(
            "No project found matching '{query}'. Available projects include: {}",
            suggestions.join(", ")
        )
    }
}

/// Failures reported by a [`SentryApi`](crate::SentryApi) implementation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested resource does not exist (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Transport, timeout, auth, or server failure.
    #[error("{0}")]
    Unavailable(String),

    /// The response body was not the JSON we expected.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Failures reported by a [`ProjectMatcher`](crate::ProjectMatcher).
#[derive(Debug, Error)]
pub enum MatchError {
    /// No model credentials are configured.
    #[error("model-assisted matching is disabled (no model API key configured)")]
    Disabled,

    /// The model call failed.
    #[error("model call failed: {0}")]
    Unavailable(String),

    /// The model call did not finish within the configured timeout.
    #[error("model call timed out after {secs}s")]
    TimedOut { secs: u64 },
}
