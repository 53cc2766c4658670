//! Collaborator seams.
//!
//! [`SentryApi`] is the read-only slice of the Sentry REST API the monitor
//! consumes; [`ProjectMatcher`] is the language-model fuzzy matcher. Both are
//! injected into [`Monitor`](crate::Monitor) as trait objects so tests can
//! substitute deterministic stubs.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::{ApiError, MatchError};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// `statsPeriod` values the issue-listing endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsPeriod {
    Day,
    TwoWeeks,
    Unbounded,
}

impl StatsPeriod {
    /// Smallest period that still covers a window of `minutes`.
    #[must_use]
    pub const fn covering(minutes: i64) -> Self {
        if minutes <= MINUTES_PER_DAY {
            Self::Day
        } else if minutes <= 14 * MINUTES_PER_DAY {
            Self::TwoWeeks
        } else {
            Self::Unbounded
        }
    }

    /// Query-string value (`""` means no period restriction).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "24h",
            Self::TwoWeeks => "14d",
            Self::Unbounded => "",
        }
    }
}

/// Parameters for a per-project issue listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueQuery {
    /// Upper bound on items the API should return.
    pub limit: usize,
    pub stats_period: StatsPeriod,
}

/// Read-only Sentry API surface. Payloads are raw JSON; list payloads are
/// passed through [`normalize`](crate::normalize) by the caller.
#[async_trait]
pub trait SentryApi: Send + Sync {
    /// All projects in the configured organization.
    async fn list_projects(&self) -> Result<Value, ApiError>;

    async fn project_details(&self, project_slug: &str) -> Result<Value, ApiError>;

    async fn list_project_issues(
        &self,
        project_slug: &str,
        query: IssueQuery,
    ) -> Result<Value, ApiError>;

    /// Issue detail, including the `stats.24h` / `stats.30d` series.
    async fn issue_details(&self, issue_id: &str) -> Result<Value, ApiError>;

    async fn issue_latest_event(&self, issue_id: &str) -> Result<Value, ApiError>;

    async fn issue_events(&self, issue_id: &str, limit: usize) -> Result<Value, ApiError>;
}

/// A project a name can resolve to: its slug plus the display name users
/// tend to type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCandidate {
    pub slug: String,
    pub name: String,
}

impl ProjectCandidate {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
        }
    }
}

/// Model-assisted fuzzy matcher.
///
/// Returns the slug it believes the query refers to, or `None` when it
/// finds no plausible match. The answer is not trusted: the resolver only
/// accepts slugs present in the candidate set.
#[async_trait]
pub trait ProjectMatcher: Send + Sync {
    async fn suggest(
        &self,
        query: &str,
        candidates: &[ProjectCandidate],
    ) -> Result<Option<String>, MatchError>;
}
