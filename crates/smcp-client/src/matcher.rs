//! Chat-completion project matcher.
//!
//! Sends a single prompt listing each candidate's display name and slug and
//! asks the model for exactly one slug or `no_match`. The answer is only cleaned up here; the
//! resolver decides whether it names a real candidate.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use smcp_config::ModelConfig;
use smcp_core::{MatchError, ProjectCandidate, ProjectMatcher};

use crate::error::ClientError;
use crate::http::{check_response, read_json};
use crate::user_agent;

/// Sentinel the model is asked to return when nothing fits.
const NO_MATCH: &str = "no_match";

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

/// [`ProjectMatcher`] backed by an OpenAI-compatible chat-completions API.
pub struct ChatMatcher {
    http: reqwest::Client,
    url: String,
    model: String,
    api_key: String,
}

impl ChatMatcher {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be built.
    pub fn new(config: &ModelConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            url: config.completions_url(),
            model: config.request_model().to_string(),
            api_key: config.api_key.clone(),
        })
    }

    async fn complete(&self, prompt: &str) -> Result<Option<String>, ClientError> {
        let body = CompletionRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.0,
        };
        let resp = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let data: CompletionResponse = read_json(check_response(resp).await?).await?;
        Ok(data
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}

#[async_trait]
impl ProjectMatcher for ChatMatcher {
    async fn suggest(
        &self,
        query: &str,
        candidates: &[ProjectCandidate],
    ) -> Result<Option<String>, MatchError> {
        let prompt = build_prompt(query, candidates);
        tracing::debug!(
            model = %self.model,
            query,
            candidates = candidates.len(),
            "asking model for project match"
        );
        let answer = self.complete(&prompt).await?;
        Ok(answer.as_deref().and_then(parse_answer))
    }
}

/// Used when no model key is configured; every request reports `Disabled`.
pub struct DisabledMatcher;

#[async_trait]
impl ProjectMatcher for DisabledMatcher {
    async fn suggest(
        &self,
        _query: &str,
        _candidates: &[ProjectCandidate],
    ) -> Result<Option<String>, MatchError> {
        Err(MatchError::Disabled)
    }
}

fn build_prompt(query: &str, candidates: &[ProjectCandidate]) -> String {
    let listing: String = candidates
        .iter()
        .map(|c| format!("- {} (slug: {})\n", c.name, c.slug))
        .collect();
    format!(
        "Find the Sentry project that best matches the name \"{query}\".\n\n\
         Available projects:\n{listing}\n\
         Consider exact matches, partial matches, similar naming patterns, \
         and common abbreviations or variations.\n\n\
         Reply with only the slug of the best matching project, exactly as \
         listed. If no project is a good match, reply with \"{NO_MATCH}\"."
    )
}

/// Strip whitespace, quotes, and backticks. Empty or `no_match` is `None`.
fn parse_answer(raw: &str) -> Option<String> {
    let cleaned = raw
        .trim()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '`'))
        .trim();
    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case(NO_MATCH) {
        None
    } else {
        Some(cleaned.to_string())
    }
}
