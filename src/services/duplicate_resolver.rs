//! Duplicate title lookup.
//!
//! Searches the tracker for an existing open issue whose title equals the
//! candidate title. Any lookup failure is logged and treated as "no match":
//! a broken search must never block feedback from being filed.

use crate::domain::models::TrackerIssueRef;
use crate::domain::ports::IssueTracker;

/// Maximum number of search candidates requested from the tracker.
pub const SEARCH_CANDIDATE_LIMIT: u32 = 100;

/// Search string scoped to open issues of `repo`, newest authored first.
///
/// The title is searched as one quoted phrase so qualifiers typed into it
/// (`repo:`, `is:closed`, ...) stay plain text.
pub fn search_query(repo: &str, title: &str) -> String {
    let phrase = title.replace('"', " ");
    format!("repo:{repo} is:issue is:open sort:author-date-desc in:title \"{}\"", phrase.trim())
}

/// Find the first open issue in `repo` whose title is exactly `title`.
///
/// The tracker's full-text search only narrows candidates; title equality
/// and the owning repository are checked here, in tracker order.
/// Repository names compare case-insensitively, as GitHub treats them.
pub async fn find_matching_issue(
    tracker: &dyn IssueTracker,
    repo: &str,
    title: &str,
) -> Option<TrackerIssueRef> {
    let query = search_query(repo, title);
    match tracker.search_issues(&query, SEARCH_CANDIDATE_LIMIT).await {
        Ok(candidates) => {
            let candidate_count = candidates.len();
            let found = candidates
                .into_iter()
                .find(|issue| issue.title == title && issue.repo.eq_ignore_ascii_case(repo));
            tracing::debug!(
                repo = repo,
                candidates = candidate_count,
                matched = found.as_ref().map(|issue| issue.number),
                "duplicate title lookup finished"
            );
            found
        }
        Err(err) => {
            tracing::warn!(
                repo = repo,
                error = %err,
                "duplicate title lookup failed, treating as no match"
            );
            None
        }
    }
}
