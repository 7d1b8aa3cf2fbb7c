//! GitHub API request and response models.
//!
//! These structs map to the GitHub REST v3 and GraphQL v4 JSON payloads.
//! They are used internally by the GitHub adapter and are not part of the
//! public domain model.

use serde::{Deserialize, Serialize};

use crate::domain::models::TrackerIssueRef;

/// GraphQL document for the duplicate title search.
///
/// Pull requests also match `type: ISSUE`; they come back as empty nodes
/// because only the `Issue` fragment selects fields.
pub const SEARCH_ISSUES_QUERY: &str = r"query SearchIssues($q: String!, $first: Int!) {
  search(query: $q, type: ISSUE, first: $first) {
    nodes {
      ... on Issue {
        number
        title
        body
        repository {
          nameWithOwner
        }
      }
    }
  }
}";

/// Request body for posting a comment on an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubCommentRequest {
    /// The comment body (Markdown).
    pub body: String,
}

/// Request body for creating a new GitHub issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubCreateIssueRequest {
    /// Issue title.
    pub title: String,
    /// Issue body (Markdown).
    pub body: String,
}

/// Error payload returned by the REST API on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubErrorResponse {
    /// Human-readable failure reason (e.g., "Bad credentials").
    pub message: String,
    /// Link to the relevant API docs.
    #[serde(default)]
    pub documentation_url: Option<String>,
}

/// GraphQL request envelope.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a> {
    /// GraphQL document.
    pub query: &'a str,
    /// Values bound to the document's variables.
    pub variables: SearchVariables<'a>,
}

/// Variables for [`SEARCH_ISSUES_QUERY`].
#[derive(Debug, Clone, Serialize)]
pub struct SearchVariables<'a> {
    /// GitHub search string.
    pub q: &'a str,
    /// Maximum number of hits.
    pub first: u32,
}

/// GraphQL response envelope. A 200 response may still carry `errors`.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    /// Query result; absent when the query failed outright.
    pub data: Option<T>,
    /// Errors reported alongside (or instead of) `data`.
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// A single GraphQL error entry.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    /// Human-readable error.
    pub message: String,
}

/// `data` of the search query.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchData {
    /// The `search` connection.
    pub search: SearchConnection,
}

/// Search hits in relevance order.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConnection {
    /// One entry per hit; `null` for hits the token cannot see.
    #[serde(default)]
    pub nodes: Vec<Option<SearchNode>>,
}

/// One search hit. Every field is optional because non-issue hits are empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchNode {
    /// Issue number.
    #[serde(default)]
    pub number: Option<u64>,
    /// Issue title.
    #[serde(default)]
    pub title: Option<String>,
    /// Issue body.
    #[serde(default)]
    pub body: Option<String>,
    /// Owning repository.
    #[serde(default)]
    pub repository: Option<SearchRepository>,
}

/// Repository owning a search hit.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRepository {
    /// `owner/repo`
    pub name_with_owner: String,
}

impl SearchNode {
    /// Convert into a tracker reference, dropping nodes that aren't issues.
    pub fn into_issue_ref(self) -> Option<TrackerIssueRef> {
        Some(TrackerIssueRef {
            repo: self.repository?.name_with_owner,
            number: self.number?,
            title: self.title?,
            body: self.body.unwrap_or_default(),
        })
    }
}
