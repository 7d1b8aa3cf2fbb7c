//! Feedback GitHub - files user feedback as GitHub issues
//!
//! Feedback posted by a website widget is rendered into a Markdown issue
//! (feedback text, screenshot, request headers, detected browser and OS,
//! classifier scores, extra fields) and filed in one configured repository.
//! When an open issue with exactly the same title already exists, the
//! feedback is added to it as a comment instead.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, errors and the `IssueTracker` port
//! - **Service Layer** (`services`): rendering and the dedupe-or-create flow
//! - **Adapters** (`adapters`): GitHub client, HTTP server, test tracker
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use feedback_github::{ConfigLoader, GitHubClient, SubmissionRouter};
//!
//! let config = ConfigLoader::load()?;
//! let client = Arc::new(GitHubClient::new(&config.github)?);
//! let router = SubmissionRouter::new(&config.github, client);
//! ```

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::{FeedbackHttpConfig, FeedbackHttpServer, GitHubClient};
pub use domain::models::{
    AllowedRepos, Config, FeedbackSubmission, GitHubConfig, LoggingConfig, RenderedIssue,
    RequestContext, ServerConfig, TrackerIssueRef,
};
pub use domain::ports::IssueTracker;
pub use domain::{FeedbackError, FeedbackResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{compose_issue, SubmissionRouter};
