//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

#![allow(dead_code)]

use feedback_github::{AllowedRepos, GitHubClient, GitHubConfig};
use serde_json::{json, Value};

pub const TEST_TOKEN: &str = "ghp_integrationtesttoken";
pub const TEST_REPO: &str = "alice/repo";

pub const FIREFOX_UA: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0";

/// GitHub configuration pointing both APIs at `base_url`.
pub fn github_config(base_url: &str) -> GitHubConfig {
    GitHubConfig {
        token: TEST_TOKEN.to_string(),
        repo: TEST_REPO.to_string(),
        allowed_repos: AllowedRepos::All,
        api_base: base_url.to_string(),
        graphql_url: None,
        timeout_secs: 5,
    }
}

/// A client for a mockito server.
pub fn github_client(base_url: &str) -> GitHubClient {
    GitHubClient::new(&github_config(base_url)).expect("Failed to create client")
}

/// GraphQL search response listing `(number, title)` issues of [`TEST_REPO`].
pub fn search_response(issues: &[(u64, &str)]) -> String {
    let issues: Vec<(&str, u64, &str)> = issues
        .iter()
        .map(|(number, title)| (TEST_REPO, *number, *title))
        .collect();
    search_response_in(&issues)
}

/// GraphQL search response listing `(repo, number, title)` issues.
pub fn search_response_in(issues: &[(&str, u64, &str)]) -> String {
    let nodes: Vec<Value> = issues
        .iter()
        .map(|(repo, number, title)| {
            json!({
                "number": number,
                "title": title,
                "body": "earlier",
                "repository": { "nameWithOwner": repo }
            })
        })
        .collect();
    json!({ "data": { "search": { "nodes": nodes } } }).to_string()
}

/// Minimal REST issue payload as returned by the create endpoint.
pub fn issue_response(number: u64, title: &str) -> String {
    json!({
        "number": number,
        "title": title,
        "html_url": format!("https://github.com/{TEST_REPO}/issues/{number}"),
        "state": "open"
    })
    .to_string()
}

/// Minimal REST comment payload.
pub fn comment_response(id: u64, issue_number: u64) -> String {
    json!({
        "id": id,
        "html_url": format!("https://github.com/{TEST_REPO}/issues/{issue_number}#issuecomment-{id}"),
        "body": "comment"
    })
    .to_string()
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
