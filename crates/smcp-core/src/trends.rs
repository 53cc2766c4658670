//! Trend summaries over issue statistics.
//!
//! A series is a list of `[unix_timestamp, count]` buckets, oldest first.
//! Direction compares the most recent bucket against the one before it; no
//! smoothing is applied.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::TrendDirection;

/// One statistics bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StatPoint {
    pub timestamp: i64,
    pub count: u64,
}

impl StatPoint {
    /// Parse a `[timestamp, count]` pair. Anything else is skipped.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_value(value: &Value) -> Option<Self> {
        let pair = value.as_array()?;
        let timestamp = pair.first()?.as_f64()?;
        let count = pair.get(1)?.as_f64()?;
        if !timestamp.is_finite() || !count.is_finite() || count < 0.0 {
            return None;
        }
        Some(Self {
            timestamp: timestamp as i64,
            count: count as u64,
        })
    }
}

/// Parse normalized series items, dropping malformed buckets.
#[must_use]
pub fn parse_series(items: &[Value]) -> Vec<StatPoint> {
    let points: Vec<StatPoint> = items.iter().filter_map(StatPoint::from_value).collect();
    let skipped = items.len() - points.len();
    if skipped > 0 {
        tracing::debug!(skipped, "dropped malformed statistics buckets");
    }
    points
}

/// Busiest bucket of a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Peak {
    pub at: Option<DateTime<Utc>>,
    pub count: u64,
}

/// Summary of one series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SeriesSummary {
    pub buckets: usize,
    pub total_events: u64,
    pub active_buckets: usize,
    pub peak: Option<Peak>,
    pub latest: Option<u64>,
    pub previous: Option<u64>,
    /// `latest - previous`, when both exist.
    pub change: Option<i64>,
    pub direction: TrendDirection,
}

/// Direction of the last step of a series.
#[must_use]
pub fn direction(series: &[StatPoint]) -> TrendDirection {
    match series {
        [.., previous, latest] => match latest.count.cmp(&previous.count) {
            Ordering::Greater => TrendDirection::Increasing,
            Ordering::Less => TrendDirection::Decreasing,
            Ordering::Equal => TrendDirection::Flat,
        },
        _ => TrendDirection::InsufficientData,
    }
}

#[must_use]
pub fn summarize(series: &[StatPoint]) -> SeriesSummary {
    let latest = series.last().map(|p| p.count);
    let previous = series.len().checked_sub(2).map(|i| series[i].count);
    let change = match (latest, previous) {
        (Some(l), Some(p)) => Some(signed(l).saturating_sub(signed(p))),
        _ => None,
    };

    // First occurrence of the maximum wins.
    let peak = series
        .iter()
        .fold(None::<&StatPoint>, |best, p| match best {
            Some(b) if b.count >= p.count => Some(b),
            _ => Some(p),
        })
        .map(|p| Peak {
            at: DateTime::from_timestamp(p.timestamp, 0),
            count: p.count,
        });

    SeriesSummary {
        buckets: series.len(),
        total_events: series
            .iter()
            .fold(0u64, |acc, p| acc.saturating_add(p.count)),
        active_buckets: series.iter().filter(|p| p.count > 0).count(),
        peak,
        latest,
        previous,
        change,
        direction: direction(series),
    }
}

/// Overall trend: hourly direction, falling back to daily when hourly data
/// cannot say.
#[must_use]
pub const fn overall(hourly: TrendDirection, daily: TrendDirection) -> TrendDirection {
    match hourly {
        TrendDirection::InsufficientData => daily,
        other => other,
    }
}

fn signed(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}
