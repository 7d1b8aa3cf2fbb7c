//! GitHub HTTP client.
//!
//! Wraps the GraphQL search endpoint and the REST v3 issue/comment
//! endpoints behind the [`IssueTracker`] port. Every request is bounded by
//! the client-wide timeout; nothing is retried.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;

use crate::domain::errors::{FeedbackError, FeedbackResult};
use crate::domain::models::{GitHubConfig, RenderedIssue, TrackerIssueRef};
use crate::domain::ports::IssueTracker;
use crate::infrastructure::logging::SecretScrubber;

use super::models::{
    GitHubCommentRequest, GitHubCreateIssueRequest, GitHubErrorResponse, GraphQlRequest,
    GraphQlResponse, SearchData, SearchNode, SearchVariables, SEARCH_ISSUES_QUERY,
};

/// Value sent in the `User-Agent` header, which GitHub requires.
const USER_AGENT: &str = concat!("feedback-github/", env!("CARGO_PKG_VERSION"));

/// Authorization scheme for an outbound call.
///
/// The GraphQL endpoint is called with `bearer`, the REST endpoints with
/// `token`; GitHub accepts a personal access token under both.
#[derive(Debug, Clone, Copy)]
enum AuthScheme {
    Bearer,
    Token,
}

impl AuthScheme {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Bearer => "bearer",
            Self::Token => "token",
        }
    }
}

/// HTTP client for the GitHub API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// The underlying HTTP client (connection pool shared across requests).
    http: Client,
    /// GitHub personal access token or fine-grained token.
    token: String,
    /// REST API base URL without trailing slash.
    api_base: String,
    /// GraphQL endpoint URL.
    graphql_url: String,
    scrubber: SecretScrubber,
}

impl GitHubClient {
    /// Build a client from the GitHub section of the configuration.
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build GitHub HTTP client")?;

        Ok(Self {
            http,
            token: config.token.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            graphql_url: config.graphql_endpoint(),
            scrubber: SecretScrubber::new(),
        })
    }

    /// Build an authorized POST request.
    fn post(&self, url: &str, scheme: AuthScheme) -> reqwest::RequestBuilder {
        self.http
            .post(url)
            .header("Authorization", format!("{} {}", scheme.as_str(), self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    fn issues_url(&self, repo: &str) -> String {
        format!("{}/repos/{}/issues", self.api_base, repo)
    }

    fn comments_url(&self, repo: &str, issue_number: u64) -> String {
        format!("{}/repos/{}/issues/{}/comments", self.api_base, repo, issue_number)
    }

    /// Turn a create-call response into the raw payload or a tracker failure.
    async fn read_payload(&self, operation: &str, resp: Response) -> FeedbackResult<Value> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(
                operation = operation,
                status = status.as_u16(),
                body = %self.scrubber.scrub_message(&body),
                "GitHub rejected request"
            );
            return Err(FeedbackError::TrackerRequestFailed {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FeedbackError::from_transport(&format!("GitHub {operation} read failed"), &e))?;
        Ok(success_payload(operation, &body))
    }
}

/// The created object as JSON. GitHub accepted the write, so a body that is
/// not JSON is passed through as a string (or null when empty).
fn success_payload(operation: &str, body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| {
        tracing::debug!(operation = operation, "GitHub returned a non-JSON success body");
        Value::String(body.to_string())
    })
}

/// The `message` of a GitHub error payload, or the raw body, or the status.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<GitHubErrorResponse>(body) {
        return parsed.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("GitHub request failed")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl IssueTracker for GitHubClient {
    async fn search_issues(&self, query: &str, limit: u32) -> FeedbackResult<Vec<TrackerIssueRef>> {
        let request = GraphQlRequest {
            query: SEARCH_ISSUES_QUERY,
            variables: SearchVariables { q: query, first: limit },
        };

        let resp = self
            .post(&self.graphql_url, AuthScheme::Bearer)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                FeedbackError::DuplicateLookupFailed(format!("GitHub search request failed: {e}"))
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(FeedbackError::DuplicateLookupFailed(format!(
                "GitHub search returned {status}: {}",
                self.scrubber.scrub_message(&body)
            )));
        }

        let payload = resp
            .json::<GraphQlResponse<SearchData>>()
            .await
            .map_err(|e| {
                FeedbackError::DuplicateLookupFailed(format!("GitHub search parse failed: {e}"))
            })?;

        if let Some(first) = payload.errors.first() {
            return Err(FeedbackError::DuplicateLookupFailed(format!(
                "GitHub search returned errors: {}",
                first.message
            )));
        }

        let data = payload.data.ok_or_else(|| {
            FeedbackError::DuplicateLookupFailed("GitHub search returned no data".to_string())
        })?;

        Ok(data
            .search
            .nodes
            .into_iter()
            .flatten()
            .filter_map(SearchNode::into_issue_ref)
            .collect())
    }

    async fn create_issue(&self, repo: &str, issue: &RenderedIssue) -> FeedbackResult<Value> {
        let request = GitHubCreateIssueRequest {
            title: issue.title.clone(),
            body: issue.body.clone(),
        };

        let resp = self
            .post(&self.issues_url(repo), AuthScheme::Token)
            .json(&request)
            .send()
            .await
            .map_err(|e| FeedbackError::from_transport("GitHub create_issue request failed", &e))?;

        self.read_payload("create_issue", resp).await
    }

    async fn create_comment(&self, repo: &str, issue_number: u64, body: &str) -> FeedbackResult<Value> {
        let request = GitHubCommentRequest {
            body: body.to_string(),
        };

        let resp = self
            .post(&self.comments_url(repo, issue_number), AuthScheme::Token)
            .json(&request)
            .send()
            .await
            .map_err(|e| FeedbackError::from_transport("GitHub create_comment request failed", &e))?;

        self.read_payload("create_comment", resp).await
    }
}
