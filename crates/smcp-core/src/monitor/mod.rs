//! The monitoring service behind the four tools.
//!
//! [`Monitor`] is stateless apart from its immutable collaborators and
//! policy, so clones can serve concurrent tool calls without coordination.
//! Each call suspends only on outbound requests.

mod analysis;
mod health;
mod issue_trends;
mod recent;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::errors::{ApiError, MonitorError};
use crate::normalize::normalize;
use crate::records::string_field;
use crate::resolver::{ProjectRef, ProjectResolver, nearby_candidates};
use crate::upstream::{ProjectCandidate, ProjectMatcher, SentryApi};
use crate::window::TierPolicy;

pub use recent::{WindowFilter, filter_window};

/// Monitoring operations over an injected Sentry API and project matcher.
#[derive(Clone)]
pub struct Monitor {
    api: Arc<dyn SentryApi>,
    resolver: ProjectResolver,
    policy: TierPolicy,
}

/// A project the caller's name resolved to.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedProject {
    pub slug: String,
    pub display_name: String,
    pub reference: ProjectRef,
    /// Other projects close to the requested name, for error hints.
    pub alternatives: Vec<String>,
}

impl Monitor {
    #[must_use]
    pub fn new(
        api: Arc<dyn SentryApi>,
        matcher: Arc<dyn ProjectMatcher>,
        policy: TierPolicy,
        model_timeout: Duration,
    ) -> Self {
        Self {
            api,
            resolver: ProjectResolver::new(matcher, model_timeout),
            policy,
        }
    }

    #[must_use]
    pub const fn policy(&self) -> &TierPolicy {
        &self.policy
    }

    /// Resolve a user-supplied project name to a project in the organization.
    pub(crate) async fn resolve_project(
        &self,
        project_name: &str,
    ) -> Result<ResolvedProject, MonitorError> {
        let payload = absorb_malformed(self.api.list_projects().await, "list_projects")
            .map_err(|error| match error {
                ApiError::NotFound(message) => MonitorError::UpstreamUnavailable {
                    message: format!(
                        "project listing not found ({message}); check the organization slug"
                    ),
                },
                other => unavailable(other),
            })?;

        let candidates: Vec<ProjectCandidate> = normalize(payload)
            .iter()
            .filter_map(|project| {
                let slug = string_field(project, "slug")?;
                let name = string_field(project, "name").unwrap_or_else(|| slug.clone());
                Some(ProjectCandidate { slug, name })
            })
            .collect();

        let reference = self.resolver.resolve(project_name, &candidates).await;
        let Some(slug) = reference.resolved_slug.clone() else {
            return Err(MonitorError::ProjectNotFound {
                query: project_name.to_string(),
                suggestions: nearby_candidates(project_name, &candidates),
            });
        };

        let display_name = candidates
            .iter()
            .find(|c| c.slug == slug)
            .map_or_else(|| slug.clone(), |c| c.name.clone());
        let others: Vec<ProjectCandidate> = candidates
            .into_iter()
            .filter(|c| c.slug != slug)
            .collect();

        Ok(ResolvedProject {
            alternatives: nearby_candidates(project_name, &others),
            slug,
            display_name,
            reference,
        })
    }
}

/// Degrade a malformed payload to `null` (which normalizes to an empty
/// sequence); pass every other outcome through.
fn absorb_malformed(result: Result<Value, ApiError>, operation: &str) -> Result<Value, ApiError> {
    match result {
        Err(ApiError::Malformed(detail)) => {
            tracing::warn!(operation, %detail, "malformed upstream response; continuing with empty result");
            Ok(Value::Null)
        }
        other => other,
    }
}

fn unavailable(error: ApiError) -> MonitorError {
    MonitorError::UpstreamUnavailable {
        message: error.to_string(),
    }
}

/// Map an issue-scoped API failure: 404 means the issue does not exist.
fn issue_error(issue_id: &str, error: ApiError) -> MonitorError {
    match error {
        ApiError::NotFound(_) => MonitorError::IssueNotFound {
            issue_id: issue_id.to_string(),
        },
        other => unavailable(other),
    }
}
