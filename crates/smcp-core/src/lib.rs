//! # smcp-core
//!
//! Monitoring core for the Sentry MCP server.
//!
//! This crate holds everything with real decision logic and no network code:
//! - Error taxonomy surfaced to tool callers
//! - Response normalization for the dict-or-list payloads the Sentry API returns
//! - Time-window classification into monitoring tiers
//! - Project-name resolution with a model-assisted fallback
//! - Trend summaries over issue statistics
//! - Collaborator traits ([`SentryApi`], [`ProjectMatcher`]) and the
//!   [`Monitor`] service that drives them

pub mod enums;
pub mod errors;
pub mod monitor;
pub mod normalize;
pub mod records;
pub mod resolver;
pub mod responses;
pub mod trends;
pub mod upstream;
pub mod window;

pub use enums::{MonitoringTier, ResolutionMethod, TrendDirection};
pub use errors::{ApiError, MatchError, MonitorError};
pub use monitor::Monitor;
pub use normalize::{ResponseShape, normalize};
pub use records::IssueRecord;
pub use resolver::{ProjectRef, ProjectResolver};
pub use upstream::{IssueQuery, ProjectCandidate, ProjectMatcher, SentryApi, StatsPeriod};
pub use window::{TierPolicy, WindowClass, classify};
