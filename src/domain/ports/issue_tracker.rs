//! Port for the external issue tracker.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::FeedbackResult;
use crate::domain::models::{RenderedIssue, TrackerIssueRef};

/// Port for the external issue tracker.
///
/// Create operations return the tracker's raw JSON payload so the router can
/// pass it through unchanged.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Run an issue search and return up to `limit` candidates in tracker order.
    ///
    /// Failures are reported as `FeedbackError::DuplicateLookupFailed`.
    async fn search_issues(&self, query: &str, limit: u32) -> FeedbackResult<Vec<TrackerIssueRef>>;

    /// Open a new issue in `repo`.
    async fn create_issue(&self, repo: &str, issue: &RenderedIssue) -> FeedbackResult<Value>;

    /// Add a comment to issue `issue_number` in `repo`.
    async fn create_comment(&self, repo: &str, issue_number: u64, body: &str) -> FeedbackResult<Value>;
}
