//! Submission routing: allow-list check, composition, dedupe, create.
//!
//! Each submission moves through
//! `Received -> RepoChecked -> DocumentComposed -> DuplicateChecked ->
//! {IssueCreated | CommentCreated}` or stops at the first failure. Nothing
//! is retried.

use std::sync::Arc;

use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::domain::errors::{FeedbackError, FeedbackResult};
use crate::domain::models::{AllowedRepos, FeedbackSubmission, GitHubConfig, RequestContext};
use crate::domain::ports::IssueTracker;

use super::duplicate_resolver::find_matching_issue;
use super::issue_composer::compose_issue;

/// Files feedback into the configured repository.
///
/// Holds only read-only configuration and a shared tracker handle, so one
/// router serves any number of concurrent submissions.
#[derive(Clone)]
pub struct SubmissionRouter {
    repo: String,
    allowed_repos: AllowedRepos,
    tracker: Arc<dyn IssueTracker>,
}

impl SubmissionRouter {
    /// Router for `github.repo`, filing through `tracker`.
    pub fn new(github: &GitHubConfig, tracker: Arc<dyn IssueTracker>) -> Self {
        Self {
            repo: github.repo.clone(),
            allowed_repos: github.allowed_repos.clone(),
            tracker,
        }
    }

    /// Target repository as `owner/repo`.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Repositories feedback may be filed into.
    pub fn allowed_repos(&self) -> &AllowedRepos {
        &self.allowed_repos
    }

    /// File one submission and return the tracker's raw response.
    ///
    /// Comments on an existing issue when one has exactly the same title,
    /// otherwise opens a new issue. A failed duplicate lookup falls back to
    /// opening a new issue; a failed create call is returned as
    /// `TrackerRequestFailed`.
    pub async fn handle(
        &self,
        submission: &FeedbackSubmission,
        context: Option<&RequestContext>,
    ) -> FeedbackResult<Value> {
        let span = tracing::info_span!(
            "submission",
            submission_id = %Uuid::new_v4(),
            repo = %self.repo,
        );
        self.route(submission, context).instrument(span).await
    }

    async fn route(
        &self,
        submission: &FeedbackSubmission,
        context: Option<&RequestContext>,
    ) -> FeedbackResult<Value> {
        if !self.allowed_repos.permits(&self.repo) {
            tracing::warn!("target repository rejected by allow-list");
            return Err(FeedbackError::RepoNotAllowed(self.repo.clone()));
        }

        let issue = compose_issue(submission, context)?;
        tracing::debug!(title = %issue.title, body_len = issue.body.len(), "issue composed");

        let existing = find_matching_issue(self.tracker.as_ref(), &self.repo, &issue.title).await;

        let result = match existing {
            Some(existing) => {
                let response = self
                    .tracker
                    .create_comment(&self.repo, existing.number, &issue.body)
                    .await;
                if response.is_ok() {
                    tracing::info!(issue = existing.number, "feedback added as comment");
                }
                response
            }
            None => {
                let response = self.tracker.create_issue(&self.repo, &issue).await;
                if response.is_ok() {
                    tracing::info!(title = %issue.title, "feedback filed as new issue");
                }
                response
            }
        };

        result.inspect_err(|err| {
            tracing::error!(status = err.status(), error = %err, "tracker request failed");
        })
    }
}
