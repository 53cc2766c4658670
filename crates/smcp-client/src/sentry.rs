//! Sentry REST API client.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use smcp_config::SentryConfig;
use smcp_core::{ApiError, IssueQuery, SentryApi};

use crate::error::ClientError;
use crate::http::{check_response, read_json};
use crate::user_agent;

/// Read-only client for the organization-scoped Sentry endpoints.
pub struct SentryClient {
    http: reqwest::Client,
    api_base: String,
    organization: String,
    api_token: String,
}

impl SentryClient {
    /// Build a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be built.
    pub fn new(config: &SentryConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_base: config.api_base(),
            organization: config.organization.clone(),
            api_token: config.api_token.clone(),
        })
    }

    async fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        let url = format!("{}{path}", self.api_base);
        tracing::debug!(%url, "sentry request");
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .inspect_err(|e| {
                tracing::warn!(%url, timeout = e.is_timeout(), error = %e, "sentry request failed");
            })?;
        read_json(check_response(resp).await?).await
    }

    fn projects_path(&self) -> String {
        format!(
            "/organizations/{}/projects/",
            urlencoding::encode(&self.organization)
        )
    }

    fn project_path(&self, project_slug: &str) -> String {
        format!(
            "/projects/{}/{}/",
            urlencoding::encode(&self.organization),
            urlencoding::encode(project_slug)
        )
    }

    fn project_issues_path(&self, project_slug: &str, query: IssueQuery) -> String {
        format!(
            "{}issues/?limit={}&statsPeriod={}",
            self.project_path(project_slug),
            query.limit,
            query.stats_period.as_str()
        )
    }
}

fn issue_path(issue_id: &str) -> String {
    format!("/issues/{}/", urlencoding::encode(issue_id))
}

#[async_trait]
impl SentryApi for SentryClient {
    async fn list_projects(&self) -> Result<Value, ApiError> {
        Ok(self.get_json(&self.projects_path()).await?)
    }

    async fn project_details(&self, project_slug: &str) -> Result<Value, ApiError> {
        Ok(self.get_json(&self.project_path(project_slug)).await?)
    }

    async fn list_project_issues(
        &self,
        project_slug: &str,
        query: IssueQuery,
    ) -> Result<Value, ApiError> {
        Ok(self
            .get_json(&self.project_issues_path(project_slug, query))
            .await?)
    }

    async fn issue_details(&self, issue_id: &str) -> Result<Value, ApiError> {
        Ok(self.get_json(&issue_path(issue_id)).await?)
    }

    async fn issue_latest_event(&self, issue_id: &str) -> Result<Value, ApiError> {
        let path = format!("{}events/latest/", issue_path(issue_id));
        Ok(self.get_json(&path).await?)
    }

    async fn issue_events(&self, issue_id: &str, limit: usize) -> Result<Value, ApiError> {
        let path = format!("{}events/?limit={limit}", issue_path(issue_id));
        Ok(self.get_json(&path).await?)
    }
}
