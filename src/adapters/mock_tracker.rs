//! In-memory issue tracker for testing.

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::domain::errors::{FeedbackError, FeedbackResult};
use crate::domain::models::{RenderedIssue, TrackerIssueRef};
use crate::domain::ports::IssueTracker;

/// A call received by the mock, in arrival order.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerCall {
    /// `search_issues`
    Search { query: String, limit: u32 },
    /// `create_issue`
    CreateIssue { repo: String, title: String, body: String },
    /// `create_comment`
    CreateComment { repo: String, issue_number: u64, body: String },
}

/// Tracker double that records every call and replays canned outcomes.
#[derive(Debug, Default)]
pub struct MockIssueTracker {
    search_results: Vec<TrackerIssueRef>,
    search_failure: Option<String>,
    create_failure: Option<(u16, String)>,
    calls: RwLock<Vec<TrackerCall>>,
}

impl MockIssueTracker {
    /// Empty search results, every create succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidates returned by every search.
    pub fn with_search_results(mut self, results: Vec<TrackerIssueRef>) -> Self {
        self.search_results = results;
        self
    }

    /// Make every search fail with `message`.
    pub fn with_search_failure(mut self, message: impl Into<String>) -> Self {
        self.search_failure = Some(message.into());
        self
    }

    /// Make every create call fail with `status` and `message`.
    pub fn with_create_failure(mut self, status: u16, message: impl Into<String>) -> Self {
        self.create_failure = Some((status, message.into()));
        self
    }

    /// All calls received so far.
    pub async fn calls(&self) -> Vec<TrackerCall> {
        self.calls.read().await.clone()
    }

    async fn record(&self, call: TrackerCall) {
        self.calls.write().await.push(call);
    }

    fn create_outcome(&self, payload: Value) -> FeedbackResult<Value> {
        match &self.create_failure {
            Some((status, message)) => Err(FeedbackError::TrackerRequestFailed {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(payload),
        }
    }
}

#[async_trait]
impl IssueTracker for MockIssueTracker {
    async fn search_issues(&self, query: &str, limit: u32) -> FeedbackResult<Vec<TrackerIssueRef>> {
        self.record(TrackerCall::Search {
            query: query.to_string(),
            limit,
        })
        .await;
        match &self.search_failure {
            Some(message) => Err(FeedbackError::DuplicateLookupFailed(message.clone())),
            None => Ok(self.search_results.clone()),
        }
    }

    async fn create_issue(&self, repo: &str, issue: &RenderedIssue) -> FeedbackResult<Value> {
        self.record(TrackerCall::CreateIssue {
            repo: repo.to_string(),
            title: issue.title.clone(),
            body: issue.body.clone(),
        })
        .await;
        self.create_outcome(json!({ "number": 1, "title": issue.title, "body": issue.body }))
    }

    async fn create_comment(&self, repo: &str, issue_number: u64, body: &str) -> FeedbackResult<Value> {
        self.record(TrackerCall::CreateComment {
            repo: repo.to_string(),
            issue_number,
            body: body.to_string(),
        })
        .await;
        self.create_outcome(json!({ "id": 1, "issue_number": issue_number, "body": body }))
    }
}
