//! # smcp-client
//!
//! HTTP implementations of the monitor's collaborator seams:
//! - [`SentryClient`] implements [`smcp_core::SentryApi`] over the Sentry
//!   REST API (bearer token, bounded timeout).
//! - [`ChatMatcher`] implements [`smcp_core::ProjectMatcher`] with one
//!   chat-completion call; [`DisabledMatcher`] stands in when no model key
//!   is configured.
//!
//! Transport failures surface as [`ClientError`] and are mapped onto the
//! core error contracts at the trait boundary.

mod error;
mod http;
mod matcher;
mod sentry;

pub use error::ClientError;
pub use matcher::{ChatMatcher, DisabledMatcher};
pub use sentry::SentryClient;

/// `User-Agent` sent with every request.
pub(crate) fn user_agent() -> String {
    format!("sentry-mcp/{}", env!("CARGO_PKG_VERSION"))
}
