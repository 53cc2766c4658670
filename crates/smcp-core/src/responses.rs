//! Tool response types.
//!
//! These structs define the JSON shape returned by the four monitoring tools
//! (and printed by the matching CLI subcommands).

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{MonitoringTier, ResolutionMethod, TrendDirection};
use crate::records::IssueRecord;
use crate::trends::{SeriesSummary, StatPoint};

/// Response from `get_project_health`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectHealthResponse {
    pub project_name: String,
    pub project_slug: String,
    pub resolution_method: ResolutionMethod,
    pub health_status: String,
    pub platform: Option<String>,
    pub date_created: Option<String>,
    pub latest_release: Option<String>,
    /// Issues seen in the last 24 hours.
    pub recent_issues_count: usize,
}

/// Response from `get_recent_issues`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RecentIssuesResponse {
    pub project_name: String,
    pub project_slug: String,
    pub resolution_method: ResolutionMethod,
    pub time_range_minutes: i64,
    pub time_range_display: String,
    pub monitoring_type: MonitoringTier,
    pub issues_count: usize,
    /// Items dropped because their `lastSeen` was missing or unparsable.
    pub dropped_count: usize,
    pub issues: Vec<IssueRecord>,
}

/// Code-location metadata Sentry attaches to an issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct IssueMetadata {
    pub filename: Option<String>,
    pub function: Option<String>,
    pub error_type: Option<String>,
}

/// Response from `get_issue_analysis`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct IssueAnalysisResponse {
    pub issue_id: String,
    pub short_id: Option<String>,
    pub title: Option<String>,
    pub culprit: Option<String>,
    pub level: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub count: Option<u64>,
    pub user_count: Option<u64>,
    pub first_seen: Option<DateTime<Utc>>,
    pub last_seen: Option<DateTime<Utc>>,
    pub assigned_to: Option<String>,
    pub permalink: Option<String>,
    pub metadata: IssueMetadata,
    pub error_message: Option<String>,
    pub release_version: Option<String>,
    /// Events returned by a single bounded event-list lookup.
    pub recent_events_count: Option<usize>,
}

/// Response from `get_issue_trends`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TrendSummary {
    pub issue_id: String,
    pub title: Option<String>,
    pub hourly_series: Vec<StatPoint>,
    pub daily_series: Vec<StatPoint>,
    pub hourly: SeriesSummary,
    pub daily: SeriesSummary,
    pub trend: TrendDirection,
}
