//! Tunable monitoring tiers.

use serde::{Deserialize, Serialize};
use smcp_core::TierPolicy;

use crate::ConfigError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitoringConfig {
    /// Largest window (minutes) still treated as real-time.
    #[serde(default = "defaults::real_time_max_minutes")]
    pub real_time_max_minutes: i64,

    /// Largest window (minutes) still treated as recent.
    #[serde(default = "defaults::recent_max_minutes")]
    pub recent_max_minutes: i64,

    #[serde(default = "defaults::real_time_limit")]
    pub real_time_limit: usize,

    #[serde(default = "defaults::recent_limit")]
    pub recent_limit: usize,

    #[serde(default = "defaults::extended_limit")]
    pub extended_limit: usize,
}

mod defaults {
    use smcp_core::TierPolicy;

    pub fn real_time_max_minutes() -> i64 {
        TierPolicy::default().real_time_max_minutes
    }
    pub fn recent_max_minutes() -> i64 {
        TierPolicy::default().recent_max_minutes
    }
    pub fn real_time_limit() -> usize {
        TierPolicy::default().real_time_limit
    }
    pub fn recent_limit() -> usize {
        TierPolicy::default().recent_limit
    }
    pub fn extended_limit() -> usize {
        TierPolicy::default().extended_limit
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self::from(TierPolicy::default())
    }
}

impl From<TierPolicy> for MonitoringConfig {
    fn from(policy: TierPolicy) -> Self {
        Self {
            real_time_max_minutes: policy.real_time_max_minutes,
            recent_max_minutes: policy.recent_max_minutes,
            real_time_limit: policy.real_time_limit,
            recent_limit: policy.recent_limit,
            extended_limit: policy.extended_limit,
        }
    }
}

impl MonitoringConfig {
    /// Check tier boundaries are ordered and every ceiling is at least one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.real_time_max_minutes <= 0 {
            return Err(invalid(
                "monitoring.real_time_max_minutes",
                format!("must be positive, got {}", self.real_time_max_minutes),
            ));
        }
        if self.recent_max_minutes <= self.real_time_max_minutes {
            return Err(invalid(
                "monitoring.recent_max_minutes",
                format!(
                    "must exceed real_time_max_minutes ({}), got {}",
                    self.real_time_max_minutes, self.recent_max_minutes
                ),
            ));
        }
        for (field, limit) in [
            ("monitoring.real_time_limit", self.real_time_limit),
            ("monitoring.recent_limit", self.recent_limit),
            ("monitoring.extended_limit", self.extended_limit),
        ] {
            if limit == 0 {
                return Err(invalid(field, "must be at least 1".to_string()));
            }
        }
        Ok(())
    }

    pub const fn to_tier_policy(&self) -> TierPolicy {
        TierPolicy {
            real_time_max_minutes: self.real_time_max_minutes,
            recent_max_minutes: self.recent_max_minutes,
            real_time_limit: self.real_time_limit,
            recent_limit: self.recent_limit,
            extended_limit: self.extended_limit,
        }
    }
}

fn invalid(field: &str, reason: String) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason,
    }
}
