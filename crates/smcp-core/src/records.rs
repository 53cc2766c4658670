//! Minimal issue projection and JSON field helpers.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The reduced field set returned for each issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IssueRecord {
    pub id: String,
    pub short_id: Option<String>,
    pub title: Option<String>,
    pub level: Option<String>,
    pub status: Option<String>,
    pub last_seen: DateTime<Utc>,
    pub priority: Option<String>,
    pub project_name: Option<String>,
}

impl IssueRecord {
    /// Project an upstream issue object. Returns `None` for non-objects and
    /// items without an id.
    #[must_use]
    pub fn project(item: &Value, last_seen: DateTime<Utc>) -> Option<Self> {
        item.as_object()?;
        let id = string_field(item, "id")?;

        Some(Self {
            id,
            short_id: string_field(item, "shortId"),
            title: string_field(item, "title"),
            level: string_field(item, "level"),
            status: string_field(item, "status"),
            last_seen,
            priority: string_field(item, "priority"),
            project_name: item
                .get("project")
                .and_then(|p| string_field(p, "name").or_else(|| string_field(p, "slug"))),
        })
    }
}

/// Read `key` as a string, accepting JSON strings and numbers.
pub(crate) fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read `key` as an unsigned count, accepting numbers and numeric strings
/// (Sentry reports `count` as a string).
pub(crate) fn count_field(value: &Value, key: &str) -> Option<u64> {
    match value.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Parse an upstream timestamp: RFC 3339 strings or epoch seconds.
#[must_use]
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        _ => None,
    }
}
