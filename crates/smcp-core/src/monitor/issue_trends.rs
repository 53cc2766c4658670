use serde_json::Value;

use super::{Monitor, absorb_malformed, issue_error};
use crate::errors::MonitorError;
use crate::normalize::normalize;
use crate::records::string_field;
use crate::responses::TrendSummary;
use crate::trends::{overall, parse_series, summarize};

/// Issue-detail stats keys for the hourly and daily series.
const HOURLY_STATS_KEY: &str = "24h";
const DAILY_STATS_KEY: &str = "30d";

impl Monitor {
    /// Hourly (last 24 h) and daily (last 30 d) event series for an issue,
    /// each with a direction of change.
    ///
    /// # Errors
    ///
    /// [`MonitorError::IssueNotFound`] when the issue does not exist and
    /// [`MonitorError::UpstreamUnavailable`] when the lookup fails. Empty
    /// series are not errors; they report `insufficient_data`.
    pub async fn get_issue_trends(&self, issue_id: &str) -> Result<TrendSummary, MonitorError> {
        tracing::info!(issue_id, "get_issue_trends");

        let details = absorb_malformed(self.api.issue_details(issue_id).await, "issue_details")
            .map_err(|error| issue_error(issue_id, error))?;

        let hourly_series = parse_series(&stats_items(&details, HOURLY_STATS_KEY));
        let daily_series = parse_series(&stats_items(&details, DAILY_STATS_KEY));
        let hourly = summarize(&hourly_series);
        let daily = summarize(&daily_series);
        let trend = overall(hourly.direction, daily.direction);

        tracing::debug!(
            issue_id,
            hourly_buckets = hourly.buckets,
            daily_buckets = daily.buckets,
            trend = trend.as_str(),
            "issue trends computed"
        );

        Ok(TrendSummary {
            issue_id: issue_id.to_string(),
            title: string_field(&details, "title"),
            hourly_series,
            daily_series,
            hourly,
            daily,
            trend,
        })
    }
}

fn stats_items(details: &Value, key: &str) -> Vec<Value> {
    details
        .get("stats")
        .and_then(|stats| stats.get(key))
        .cloned()
        .map(normalize)
        .unwrap_or_default()
}
