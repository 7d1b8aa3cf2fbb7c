//! Adapters for external systems: the GitHub tracker, the inbound HTTP
//! surface and an in-memory tracker for tests.

pub mod github;
pub mod http;
pub mod mock_tracker;

pub use github::GitHubClient;
pub use http::{FeedbackHttpConfig, FeedbackHttpServer};
pub use mock_tracker::MockIssueTracker;
