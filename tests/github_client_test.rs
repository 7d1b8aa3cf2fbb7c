//! Integration tests for the GitHub client
//!
//! Every test runs against a mockito server standing in for both the
//! GraphQL and REST APIs.

mod common;

use common::{comment_response, github_client, issue_response, search_response, TEST_TOKEN};
use feedback_github::{FeedbackError, IssueTracker, RenderedIssue};
use mockito::{Matcher, Server};
use serde_json::json;

fn rendered(title: &str) -> RenderedIssue {
    RenderedIssue {
        title: title.to_string(),
        body: ":bulb: New feedback was posted\n\n## Feedback\n\nhi\n".to_string(),
    }
}

#[tokio::test]
async fn test_search_sends_bearer_token_and_variables() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql")
        .match_header("authorization", format!("bearer {TEST_TOKEN}").as_str())
        .match_header("x-github-api-version", "2022-11-28")
        .match_header("user-agent", Matcher::Regex("^feedback-github/".to_string()))
        .match_body(Matcher::PartialJson(json!({
            "variables": { "q": "repo:alice/repo in:title Hi", "first": 100 }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(search_response(&[(12, "Hi"), (13, "Hi there")]))
        .create_async()
        .await;

    let client = github_client(&server.url());
    let issues = client
        .search_issues("repo:alice/repo in:title Hi", 100)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].number, 12);
    assert_eq!(issues[0].repo, "alice/repo");
    assert_eq!(issues[1].title, "Hi there");
}

#[tokio::test]
async fn test_search_graphql_errors_are_lookup_failures() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"errors":[{"message":"Bad search syntax"}]}"#)
        .create_async()
        .await;

    let client = github_client(&server.url());
    let err = client.search_issues("q", 100).await.unwrap_err();

    match err {
        FeedbackError::DuplicateLookupFailed(message) => {
            assert!(message.contains("Bad search syntax"));
        }
        other => panic!("expected DuplicateLookupFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_search_http_error_is_lookup_failure() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/graphql")
        .with_status(502)
        .with_body("upstream down")
        .create_async()
        .await;

    let client = github_client(&server.url());
    let err = client.search_issues("q", 100).await.unwrap_err();
    assert!(matches!(err, FeedbackError::DuplicateLookupFailed(_)));
}

#[tokio::test]
async fn test_create_issue_posts_title_and_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/repos/alice/repo/issues")
        .match_header("authorization", format!("token {TEST_TOKEN}").as_str())
        .match_header("accept", "application/vnd.github+json")
        .match_body(Matcher::PartialJson(json!({ "title": "Button broken" })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(issue_response(7, "Button broken"))
        .create_async()
        .await;

    let client = github_client(&server.url());
    let payload = client
        .create_issue("alice/repo", &rendered("Button broken"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(payload["number"], 7);
    assert_eq!(payload["state"], "open");
}

#[tokio::test]
async fn test_create_issue_rejection_carries_status_and_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/repos/alice/repo/issues")
        .with_status(403)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Resource not accessible by integration","documentation_url":"https://docs.github.com"}"#)
        .create_async()
        .await;

    let client = github_client(&server.url());
    let err = client
        .create_issue("alice/repo", &rendered("Button broken"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), 403);
    assert_eq!(err.code(), "TRACKER_REQUEST_FAILED");
    assert_eq!(err.to_string(), "Resource not accessible by integration");
}

#[tokio::test]
async fn test_create_issue_success_with_non_json_body_is_not_an_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/repos/alice/repo/issues")
        .with_status(201)
        .with_header("content-type", "text/plain")
        .with_body("Created")
        .create_async()
        .await;
    server
        .mock("POST", "/repos/alice/repo/issues/42/comments")
        .with_status(201)
        .create_async()
        .await;

    let client = github_client(&server.url());
    let payload = client
        .create_issue("alice/repo", &rendered("Button broken"))
        .await
        .unwrap();
    assert_eq!(payload, json!("Created"));

    let payload = client
        .create_comment("alice/repo", 42, "more feedback")
        .await
        .unwrap();
    assert!(payload.is_null());
}

#[tokio::test]
async fn test_create_comment_targets_issue_number() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/repos/alice/repo/issues/42/comments")
        .match_header("authorization", format!("token {TEST_TOKEN}").as_str())
        .match_body(Matcher::Json(json!({ "body": "more feedback" })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(comment_response(900, 42))
        .create_async()
        .await;

    let client = github_client(&server.url());
    let payload = client
        .create_comment("alice/repo", 42, "more feedback")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(payload["id"], 900);
}
