//! Time-window classification.
//!
//! A requested minute count maps to exactly one [`MonitoringTier`]. Tiers are
//! contiguous and cover every positive minute value:
//!
//! ```text
//! 1 ..= real_time_max_minutes            → real_time (real_time_limit)
//! real_time_max + 1 ..= recent_max       → recent    (recent_limit)
//! recent_max + 1 ..                      → extended  (extended_limit)
//! ```

use serde::{Deserialize, Serialize};

use crate::enums::MonitoringTier;
use crate::errors::MonitorError;

const MINUTES_PER_HOUR: i64 = 60;

/// Tier boundaries (inclusive upper bounds, in minutes) and result ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPolicy {
    pub real_time_max_minutes: i64,
    pub recent_max_minutes: i64,
    pub real_time_limit: usize,
    pub recent_limit: usize,
    pub extended_limit: usize,
}

impl Default for TierPolicy {
    fn default() -> Self {
        Self {
            real_time_max_minutes: 30,
            recent_max_minutes: 120,
            real_time_limit: 100,
            recent_limit: 75,
            extended_limit: 50,
        }
    }
}

impl TierPolicy {
    /// Result ceiling for a tier.
    #[must_use]
    pub const fn ceiling(&self, tier: MonitoringTier) -> usize {
        match tier {
            MonitoringTier::RealTime => self.real_time_limit,
            MonitoringTier::Recent => self.recent_limit,
            MonitoringTier::Extended => self.extended_limit,
        }
    }

    /// Classify a minute count under this policy.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::InvalidWindow`] when `minutes <= 0`.
    pub fn classify(&self, minutes: i64) -> Result<WindowClass, MonitorError> {
        if minutes <= 0 {
            return Err(MonitorError::InvalidWindow { minutes });
        }

        let tier = if minutes <= self.real_time_max_minutes {
            MonitoringTier::RealTime
        } else if minutes <= self.recent_max_minutes {
            MonitoringTier::Recent
        } else {
            MonitoringTier::Extended
        };

        Ok(WindowClass {
            minutes,
            tier,
            ceiling: self.ceiling(tier),
            label: display_label(minutes),
        })
    }
}

/// Result of classifying a time window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowClass {
    pub minutes: i64,
    pub tier: MonitoringTier,
    pub ceiling: usize,
    pub label: String,
}

/// Classify under the default policy.
///
/// # Errors
///
/// Returns [`MonitorError::InvalidWindow`] when `minutes <= 0`.
pub fn classify(minutes: i64) -> Result<WindowClass, MonitorError> {
    TierPolicy::default().classify(minutes)
}

/// Human-readable window label: whole minutes below an hour, otherwise hours
/// with at most one decimal.
#[must_use]
pub fn display_label(minutes: i64) -> String {
    if minutes < MINUTES_PER_HOUR {
        return if minutes == 1 {
            String::from("1 minute")
        } else {
            format!("{minutes} minutes")
        };
    }

    // Tenths of an hour, rounded half-up. Widened so `i64::MAX` cannot overflow.
    let per_hour = i128::from(MINUTES_PER_HOUR);
    let tenths = (i128::from(minutes) * 10 + per_hour / 2) / per_hour;
    let (whole, frac) = (tenths / 10, tenths % 10);
    match (whole, frac) {
        (1, 0) => String::from("1 hour"),
        (w, 0) => format!("{w} hours"),
        (w, f) => format!("{w}.{f} hours"),
    }
}
