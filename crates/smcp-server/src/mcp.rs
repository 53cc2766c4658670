//! MCP tool server.
//!
//! Exposes the four monitoring operations as MCP tools over stdio. Domain
//! failures never surface as protocol errors: they come back as an error
//! result whose text is `{ "error", "message", "retryable", "suggestions"? }`.

use anyhow::Context;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, ServiceExt, tool, tool_handler, tool_router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use smcp_core::{Monitor, MonitorError};

use crate::cli::DEFAULT_WINDOW_MINUTES;

const INSTRUCTIONS: &str = "Sentry monitoring tools. Use 'get_project_health' for a project overview, \
'get_recent_issues' for issues seen in the last N minutes (1-30 real-time, 31-120 recent, \
121+ extended), 'get_issue_analysis' for one issue's details, and 'get_issue_trends' for its \
hourly and daily event trends. Project names may be slugs, display names, or close variations.";

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ProjectRequest {
    #[schemars(description = "Project name or slug; matched exactly, case-insensitively, then by model")]
    pub project_name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecentIssuesRequest {
    #[schemars(description = "Project name or slug")]
    pub project_name: String,

    #[schemars(description = "Window length in minutes (default 60, must be positive)")]
    #[serde(default = "default_window_minutes")]
    pub time_range_minutes: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IssueRequest {
    #[schemars(description = "Sentry issue id")]
    pub issue_id: String,
}

const fn default_window_minutes() -> i64 {
    DEFAULT_WINDOW_MINUTES
}

#[derive(Clone)]
pub struct SentryMcpServer {
    monitor: Monitor,
    tool_router: ToolRouter<Self>,
}

impl SentryMcpServer {
    pub fn new(monitor: Monitor) -> Self {
        Self {
            monitor,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_handler]
impl ServerHandler for SentryMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}

#[tool_router]
impl SentryMcpServer {
    #[tool(description = "Health summary for a Sentry project: status, platform, creation date, latest release, and the number of issues seen in the last 24 hours.")]
    async fn get_project_health(
        &self,
        Parameters(request): Parameters<ProjectRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.monitor.get_project_health(&request.project_name).await)
    }

    #[tool(description = "Issues seen in the last N minutes for a Sentry project. Windows of 1-30 minutes return up to 100 issues (real_time), 31-120 up to 75 (recent), longer up to 50 (extended).")]
    async fn get_recent_issues(
        &self,
        Parameters(request): Parameters<RecentIssuesRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            self.monitor
                .get_recent_issues(&request.project_name, request.time_range_minutes)
                .await,
        )
    }

    #[tool(description = "Detailed analysis of one Sentry issue: counts, first/last seen, assignee, culprit location, latest error message, and release.")]
    async fn get_issue_analysis(
        &self,
        Parameters(request): Parameters<IssueRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.monitor.get_issue_analysis(&request.issue_id).await)
    }

    #[tool(description = "Hourly (24h) and daily (30d) event series for one Sentry issue, with peak, latest change, and whether events are increasing, decreasing, or flat.")]
    async fn get_issue_trends(
        &self,
        Parameters(request): Parameters<IssueRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.monitor.get_issue_trends(&request.issue_id).await)
    }
}

fn respond<T: Serialize>(result: Result<T, MonitorError>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => {
            let text = serde_json::to_string_pretty(&value).map_err(|e| {
                McpError::internal_error(format!("failed to serialize response: {e}"), None)
            })?;
            Ok(CallToolResult::success(vec![Content::text(text)]))
        }
        Err(error) => {
            tracing::warn!(kind = error.kind(), %error, "tool call failed");
            Ok(CallToolResult::error(vec![Content::text(
                error_payload(&error).to_string(),
            )]))
        }
    }
}

/// Structured error body returned to tool callers.
pub fn error_payload(error: &MonitorError) -> Value {
    let mut payload = json!({
        "error": error.kind(),
        "message": error.to_string(),
        "retryable": error.is_retryable(),
    });
    if !error.suggestions().is_empty() {
        payload["suggestions"] = json!(error.suggestions());
    }
    payload
}

/// Serve the tools over stdio until the client disconnects.
pub async fn serve(monitor: Monitor) -> anyhow::Result<()> {
    tracing::info!("serving MCP tools over stdio");
    let service = SentryMcpServer::new(monitor)
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    let reason = service.waiting().await.context("MCP server task failed")?;
    tracing::info!(?reason, "MCP server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use smcp_core::{
        ApiError, IssueQuery, MatchError, ProjectCandidate, ProjectMatcher, SentryApi, TierPolicy,
    };

    use super::*;

    struct StubApi;

    #[async_trait]
    impl SentryApi for StubApi {
        async fn list_projects(&self) -> Result<Value, ApiError> {
            Ok(json!([
                {"slug": "checkout", "name": "Checkout"},
                {"slug": "checkout-worker", "name": "Checkout Worker"},
            ]))
        }

        async fn project_details(&self, _project_slug: &str) -> Result<Value, ApiError> {
            Ok(json!({"status": "active", "platform": "rust"}))
        }

        async fn list_project_issues(
            &self,
            _project_slug: &str,
            _query: IssueQuery,
        ) -> Result<Value, ApiError> {
            Ok(json!([{
                "id": "1",
                "title": "panic in handler",
                "lastSeen": Utc::now().to_rfc3339(),
            }]))
        }

        async fn issue_details(&self, issue_id: &str) -> Result<Value, ApiError> {
            Err(ApiError::NotFound(issue_id.to_string()))
        }

        async fn issue_latest_event(&self, _issue_id: &str) -> Result<Value, ApiError> {
            Err(ApiError::Unavailable("unused".into()))
        }

        async fn issue_events(&self, _issue_id: &str, _limit: usize) -> Result<Value, ApiError> {
            Err(ApiError::Unavailable("unused".into()))
        }
    }

    struct NoModel;

    #[async_trait]
    impl ProjectMatcher for NoModel {
        async fn suggest(
            &self,
            _query: &str,
            _candidates: &[ProjectCandidate],
        ) -> Result<Option<String>, MatchError> {
            Err(MatchError::Disabled)
        }
    }

    fn server() -> SentryMcpServer {
        SentryMcpServer::new(Monitor::new(
            Arc::new(StubApi),
            Arc::new(NoModel),
            TierPolicy::default(),
            Duration::from_secs(1),
        ))
    }

    /// `(is_error, parsed text)` of a tool result.
    fn unpack(result: &CallToolResult) -> (bool, Value) {
        let value = serde_json::to_value(result).unwrap();
        let is_error = value["isError"].as_bool().unwrap_or(false);
        let text = value["content"][0]["text"].as_str().unwrap();
        (is_error, serde_json::from_str(text).unwrap())
    }

    #[test]
    fn registers_four_tools() {
        let mut names: Vec<String> = server()
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "get_issue_analysis",
                "get_issue_trends",
                "get_project_health",
                "get_recent_issues"
            ]
        );
    }

    #[test]
    fn advertises_tool_capability() {
        let info = server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("get_recent_issues"));
    }

    #[test]
    fn recent_issues_window_defaults_to_sixty() {
        let request: RecentIssuesRequest =
            serde_json::from_value(json!({"project_name": "checkout"})).unwrap();
        assert_eq!(request.time_range_minutes, 60);
    }

    #[tokio::test]
    async fn recent_issues_success() {
        let result = server()
            .get_recent_issues(Parameters(RecentIssuesRequest {
                project_name: "Checkout".into(),
                time_range_minutes: 15,
            }))
            .await
            .unwrap();
        let (is_error, body) = unpack(&result);
        assert!(!is_error);
        assert_eq!(body["project_slug"], "checkout");
        assert_eq!(body["monitoring_type"], "real_time");
        assert_eq!(body["resolution_method"], "case_insensitive");
        assert_eq!(body["issues_count"], 1);
    }

    #[tokio::test]
    async fn invalid_window_is_a_structured_error() {
        let result = server()
            .get_recent_issues(Parameters(RecentIssuesRequest {
                project_name: "checkout".into(),
                time_range_minutes: 0,
            }))
            .await
            .unwrap();
        let (is_error, body) = unpack(&result);
        assert!(is_error);
        assert_eq!(body["error"], "invalid_window");
        assert_eq!(body["retryable"], false);
        assert!(body.get("suggestions").is_none());
    }

    #[tokio::test]
    async fn unknown_project_lists_suggestions() {
        let result = server()
            .get_project_health(Parameters(ProjectRequest {
                project_name: "checkou".into(),
            }))
            .await
            .unwrap();
        let (is_error, body) = unpack(&result);
        assert!(is_error);
        assert_eq!(body["error"], "project_not_found");
        assert_eq!(body["suggestions"], json!(["checkout", "checkout-worker"]));
    }

    #[tokio::test]
    async fn missing_issue_is_reported() {
        let result = server()
            .get_issue_trends(Parameters(IssueRequest {
                issue_id: "404".into(),
            }))
            .await
            .unwrap();
        let (is_error, body) = unpack(&result);
        assert!(is_error);
        assert_eq!(body["error"], "issue_not_found");
    }

    #[test]
    fn upstream_errors_are_retryable() {
        let payload = error_payload(&MonitorError::UpstreamUnavailable {
            message: "HTTP error: connection refused".into(),
        });
        assert_eq!(payload["error"], "upstream_unavailable");
        assert_eq!(payload["retryable"], true);
    }
}
