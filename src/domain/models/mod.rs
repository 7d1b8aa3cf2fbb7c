//! Domain models

pub mod config;
pub mod feedback;

pub use config::{AllowedRepos, Config, GitHubConfig, LoggingConfig, ServerConfig};
pub use feedback::{FeedbackSubmission, RenderedIssue, RequestContext, TrackerIssueRef};
