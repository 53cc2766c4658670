//! Project-name resolution.
//!
//! Maps a user-supplied, possibly inexact project name onto one of the
//! organization's project slugs. Strategies run in order and the first
//! success wins:
//!
//! 1. exact (byte-for-byte, slug then display name)
//! 2. case-insensitive (slug then display name)
//! 3. model-assisted ([`ProjectMatcher::suggest`], bounded by a timeout)
//! 4. unresolved
//!
//! Every attempt is logged with the query, the candidate count, and the
//! chosen method; naming mismatches are the most common operator complaint.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::enums::ResolutionMethod;
use crate::errors::MatchError;
use crate::upstream::{ProjectCandidate, ProjectMatcher};

/// Upper bound on names listed in a "project not found" message.
const MAX_SUGGESTIONS: usize = 10;

/// Outcome of resolving one project name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRef {
    pub requested_name: String,
    pub resolved_slug: Option<String>,
    pub resolution_method: ResolutionMethod,
}

impl ProjectRef {
    fn resolved(query: &str, slug: &str, method: ResolutionMethod) -> Self {
        Self {
            requested_name: query.to_string(),
            resolved_slug: Some(slug.to_string()),
            resolution_method: method,
        }
    }

    fn unresolved(query: &str) -> Self {
        Self {
            requested_name: query.to_string(),
            resolved_slug: None,
            resolution_method: ResolutionMethod::Unresolved,
        }
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.resolved_slug.is_some()
    }
}

/// Resolves project names against a candidate list.
#[derive(Clone)]
pub struct ProjectResolver {
    matcher: Arc<dyn ProjectMatcher>,
    model_timeout: Duration,
}

impl ProjectResolver {
    #[must_use]
    pub fn new(matcher: Arc<dyn ProjectMatcher>, model_timeout: Duration) -> Self {
        Self {
            matcher,
            model_timeout,
        }
    }

    /// Resolve `query` against `candidates`. Never fails: collaborator
    /// failures fall through to [`ResolutionMethod::Unresolved`].
    pub async fn resolve(&self, query: &str, candidates: &[ProjectCandidate]) -> ProjectRef {
        let result = self.resolve_inner(query, candidates).await;
        match &result.resolved_slug {
            Some(slug) => tracing::info!(
                query,
                candidates = candidates.len(),
                method = result.resolution_method.as_str(),
                slug = slug.as_str(),
                "resolved project"
            ),
            None => tracing::warn!(
                query,
                candidates = candidates.len(),
                method = result.resolution_method.as_str(),
                "could not resolve project"
            ),
        }
        result
    }

    async fn resolve_inner(&self, query: &str, candidates: &[ProjectCandidate]) -> ProjectRef {
        if let Some(slug) = find_exact(query, candidates) {
            return ProjectRef::resolved(query, slug, ResolutionMethod::Exact);
        }

        if let Some(slug) = find_case_insensitive(query, candidates) {
            return ProjectRef::resolved(query, slug, ResolutionMethod::CaseInsensitive);
        }

        if query.trim().is_empty() || candidates.is_empty() {
            return ProjectRef::unresolved(query);
        }

        match self.suggest_with_timeout(query, candidates).await {
            Ok(Some(suggestion)) => match canonical_slug(&suggestion, candidates) {
                Some(slug) => ProjectRef::resolved(query, slug, ResolutionMethod::ModelAssisted),
                None => {
                    tracing::debug!(
                        query,
                        suggestion = suggestion.as_str(),
                        "model suggested a slug outside the candidate set"
                    );
                    ProjectRef::unresolved(query)
                }
            },
            Ok(None) => ProjectRef::unresolved(query),
            Err(MatchError::Disabled) => {
                tracing::debug!(query, "model-assisted matching disabled");
                ProjectRef::unresolved(query)
            }
            Err(error) => {
                tracing::warn!(query, %error, "model-assisted matching failed");
                ProjectRef::unresolved(query)
            }
        }
    }

    async fn suggest_with_timeout(
        &self,
        query: &str,
        candidates: &[ProjectCandidate],
    ) -> Result<Option<String>, MatchError> {
        tokio::time::timeout(self.model_timeout, self.matcher.suggest(query, candidates))
            .await
            .map_err(|_| MatchError::TimedOut {
                secs: self.model_timeout.as_secs(),
            })?
    }
}

/// Slugs take precedence over display names at each step.
fn find_exact<'a>(query: &str, candidates: &'a [ProjectCandidate]) -> Option<&'a str> {
    candidates
        .iter()
        .find(|c| c.slug == query)
        .or_else(|| candidates.iter().find(|c| c.name == query))
        .map(|c| c.slug.as_str())
}

fn find_case_insensitive<'a>(query: &str, candidates: &'a [ProjectCandidate]) -> Option<&'a str> {
    let folded = query.to_lowercase();
    candidates
        .iter()
        .find(|c| c.slug.to_lowercase() == folded)
        .or_else(|| candidates.iter().find(|c| c.name.to_lowercase() == folded))
        .map(|c| c.slug.as_str())
}

/// Map a model answer back to the canonical slug it names.
fn canonical_slug<'a>(suggestion: &str, candidates: &'a [ProjectCandidate]) -> Option<&'a str> {
    let suggestion = suggestion.trim();
    let folded = suggestion.to_lowercase();
    candidates
        .iter()
        .find(|c| c.slug == suggestion)
        .or_else(|| candidates.iter().find(|c| c.slug.to_lowercase() == folded))
        .map(|c| c.slug.as_str())
}

/// Slugs worth showing when resolution fails: those whose slug or name
/// shares a substring with the query, or else the first few slugs.
#[must_use]
pub fn nearby_candidates(query: &str, candidates: &[ProjectCandidate]) -> Vec<String> {
    let folded = query.trim().to_lowercase();
    let related: Vec<String> = if folded.is_empty() {
        Vec::new()
    } else {
        candidates
            .iter()
            .filter(|c| {
                [&c.slug, &c.name].iter().any(|field| {
                    let field = field.to_lowercase();
                    field.contains(&folded) || folded.contains(&field)
                })
            })
            .take(MAX_SUGGESTIONS)
            .map(|c| c.slug.clone())
            .collect()
    };

    if related.is_empty() {
        candidates
            .iter()
            .take(MAX_SUGGESTIONS)
            .map(|c| c.slug.clone())
            .collect()
    } else {
        related
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Reply {
        Suggest(&'static str),
        NoMatch,
        Fail,
        Hang,
    }

    struct StubMatcher {
        reply: Reply,
        calls: AtomicUsize,
    }

    impl StubMatcher {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ProjectMatcher for StubMatcher {
        async fn suggest(
            &self,
            _query: &str,
            _candidates: &[ProjectCandidate],
        ) -> Result<Option<String>, MatchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Reply::Suggest(name) => Ok(Some(name.to_string())),
                Reply::NoMatch => Ok(None),
                Reply::Fail => Err(MatchError::Unavailable("boom".into())),
                Reply::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(None)
                }
            }
        }
    }

    fn candidates() -> Vec<ProjectCandidate> {
        vec![
            ProjectCandidate::new("Foo", "Foo Service"),
            ProjectCandidate::new("Bar", "Bar Worker"),
        ]
    }

    fn resolver(matcher: Arc<StubMatcher>) -> ProjectResolver {
        ProjectResolver::new(matcher, Duration::from_millis(50))
    }

    #[tokio::test]
    async fn exact_match_wins() {
        let matcher = StubMatcher::new(Reply::Fail);
        let result = resolver(matcher.clone()).resolve("Foo", &candidates()).await;
        assert_eq!(result.resolution_method, ResolutionMethod::Exact);
        assert_eq!(result.resolved_slug.as_deref(), Some("Foo"));
        assert_eq!(matcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn case_insensitive_match() {
        let result = resolver(StubMatcher::new(Reply::Fail))
            .resolve("foo", &candidates())
            .await;
        assert_eq!(result.resolution_method, ResolutionMethod::CaseInsensitive);
        assert_eq!(result.resolved_slug.as_deref(), Some("Foo"));
    }

    #[tokio::test]
    async fn exact_beats_case_insensitive() {
        let names = vec![
            ProjectCandidate::new("foo", "foo"),
            ProjectCandidate::new("Foo", "Foo"),
        ];
        let result = resolver(StubMatcher::new(Reply::Fail))
            .resolve("Foo", &names)
            .await;
        assert_eq!(result.resolution_method, ResolutionMethod::Exact);
        assert_eq!(result.resolved_slug.as_deref(), Some("Foo"));
    }

    #[tokio::test]
    async fn display_name_maps_to_slug() {
        let exact = resolver(StubMatcher::new(Reply::Fail))
            .resolve("Bar Worker", &candidates())
            .await;
        assert_eq!(exact.resolution_method, ResolutionMethod::Exact);
        assert_eq!(exact.resolved_slug.as_deref(), Some("Bar"));

        let folded = resolver(StubMatcher::new(Reply::Fail))
            .resolve("foo service", &candidates())
            .await;
        assert_eq!(folded.resolution_method, ResolutionMethod::CaseInsensitive);
        assert_eq!(folded.resolved_slug.as_deref(), Some("Foo"));
    }

    #[tokio::test]
    async fn slug_beats_another_projects_display_name() {
        let names = vec![
            ProjectCandidate::new("api", "gateway"),
            ProjectCandidate::new("gateway", "Public API"),
        ];
        let result = resolver(StubMatcher::new(Reply::Fail))
            .resolve("gateway", &names)
            .await;
        assert_eq!(result.resolution_method, ResolutionMethod::Exact);
        assert_eq!(result.resolved_slug.as_deref(), Some("gateway"));
    }

    #[tokio::test]
    async fn model_display_name_answer_is_unresolved() {
        let result = resolver(StubMatcher::new(Reply::Suggest("Foo Service")))
            .resolve("fooo", &candidates())
            .await;
        assert_eq!(result.resolution_method, ResolutionMethod::Unresolved);
    }

    #[tokio::test]
    async fn model_assisted_match() {
        let result = resolver(StubMatcher::new(Reply::Suggest("Foo")))
            .resolve("fo0", &candidates())
            .await;
        assert_eq!(result.resolution_method, ResolutionMethod::ModelAssisted);
        assert_eq!(result.resolved_slug.as_deref(), Some("Foo"));
    }

    #[tokio::test]
    async fn model_answer_is_mapped_to_canonical_case() {
        let result = resolver(StubMatcher::new(Reply::Suggest("  bar\n")))
            .resolve("barr", &candidates())
            .await;
        assert_eq!(result.resolution_method, ResolutionMethod::ModelAssisted);
        assert_eq!(result.resolved_slug.as_deref(), Some("Bar"));
    }

    #[tokio::test]
    async fn non_candidate_suggestion_is_unresolved() {
        let result = resolver(StubMatcher::new(Reply::Suggest("Baz")))
            .resolve("zzz", &candidates())
            .await;
        assert_eq!(result.resolution_method, ResolutionMethod::Unresolved);
        assert!(result.resolved_slug.is_none());
    }

    #[tokio::test]
    async fn collaborator_failure_is_unresolved() {
        let result = resolver(StubMatcher::new(Reply::Fail))
            .resolve("zzz", &candidates())
            .await;
        assert_eq!(result.resolution_method, ResolutionMethod::Unresolved);
        assert!(!result.is_resolved());
    }

    #[tokio::test]
    async fn collaborator_no_match_is_unresolved() {
        let result = resolver(StubMatcher::new(Reply::NoMatch))
            .resolve("zzz", &candidates())
            .await;
        assert_eq!(result.resolution_method, ResolutionMethod::Unresolved);
    }

    #[tokio::test(start_paused = true)]
    async fn collaborator_timeout_is_unresolved() {
        let result = resolver(StubMatcher::new(Reply::Hang))
            .resolve("zzz", &candidates())
            .await;
        assert_eq!(result.resolution_method, ResolutionMethod::Unresolved);
    }

    #[tokio::test]
    async fn empty_query_skips_the_model() {
        let matcher = StubMatcher::new(Reply::Suggest("Foo"));
        let result = resolver(matcher.clone()).resolve("   ", &candidates()).await;
        assert_eq!(result.resolution_method, ResolutionMethod::Unresolved);
        assert_eq!(matcher.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn nearby_candidates_prefers_substring_matches() {
        let names = vec![
            ProjectCandidate::new("payments", "Payments API"),
            ProjectCandidate::new("payments-worker", "Payments Worker"),
            ProjectCandidate::new("search", "Site Search"),
        ];
        assert_eq!(
            nearby_candidates("Payments", &names),
            vec!["payments".to_string(), "payments-worker".to_string()]
        );
        assert_eq!(nearby_candidates("site", &names), vec!["search".to_string()]);
        assert_eq!(
            nearby_candidates("zzz", &names),
            vec![
                "payments".to_string(),
                "payments-worker".to_string(),
                "search".to_string()
            ]
        );
    }
}
