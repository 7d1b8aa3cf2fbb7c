//! Domain errors for the feedback intake service.

use thiserror::Error;

/// HTTP status reported when a tracker call never produced a response.
pub const STATUS_BAD_GATEWAY: u16 = 502;

/// HTTP status reported when a tracker call ran past its timeout.
pub const STATUS_GATEWAY_TIMEOUT: u16 = 504;

/// Errors that can occur while turning feedback into a tracker issue.
#[derive(Debug, Error)]
pub enum FeedbackError {
    /// The submission is missing its required body.
    #[error("{0}")]
    InvalidSubmission(String),

    /// The configured target repository is not in the allow-list.
    #[error("Repo \"{0}\" not allowed.")]
    RepoNotAllowed(String),

    /// The duplicate title search failed. Always recovered by the router.
    #[error("Duplicate lookup failed: {0}")]
    DuplicateLookupFailed(String),

    /// The create-issue or create-comment call failed.
    #[error("{message}")]
    TrackerRequestFailed {
        /// Tracker status, or 502/504 for transport failures.
        status: u16,
        /// Tracker-provided message, falling back to the raw body.
        message: String,
    },
}

impl FeedbackError {
    /// HTTP-style status carried to the caller.
    pub fn status(&self) -> u16 {
        match self {
            Self::InvalidSubmission(_) => 422,
            Self::RepoNotAllowed(_) => 400,
            Self::DuplicateLookupFailed(_) => 500,
            Self::TrackerRequestFailed { status, .. } => *status,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSubmission(_) => "INVALID_SUBMISSION",
            Self::RepoNotAllowed(_) => "REPO_NOT_ALLOWED",
            Self::DuplicateLookupFailed(_) => "DUPLICATE_LOOKUP_FAILED",
            Self::TrackerRequestFailed { .. } => "TRACKER_REQUEST_FAILED",
        }
    }

    /// Map a transport-level reqwest failure into a tracker failure.
    pub fn from_transport(context: &str, err: &reqwest::Error) -> Self {
        let status = if err.is_timeout() {
            STATUS_GATEWAY_TIMEOUT
        } else {
            STATUS_BAD_GATEWAY
        };
        Self::TrackerRequestFailed {
            status,
            message: format!("{context}: {err}"),
        }
    }
}

/// Result alias used across the domain and adapters.
pub type FeedbackResult<T> = Result<T, FeedbackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_not_allowed_message_names_repo() {
        let err = FeedbackError::RepoNotAllowed("bob/repo".to_string());
        assert_eq!(err.to_string(), "Repo \"bob/repo\" not allowed.");
        assert_eq!(err.status(), 400);
        assert_eq!(err.code(), "REPO_NOT_ALLOWED");
    }

    #[test]
    fn test_tracker_failure_carries_status_and_message() {
        let err = FeedbackError::TrackerRequestFailed {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.status(), 404);
        assert_eq!(err.to_string(), "Not Found");
    }

    #[test]
    fn test_invalid_submission_is_client_error() {
        let err = FeedbackError::InvalidSubmission("\"body\" is required".to_string());
        assert_eq!(err.status(), 422);
        assert_eq!(err.to_string(), "\"body\" is required");
    }
}
