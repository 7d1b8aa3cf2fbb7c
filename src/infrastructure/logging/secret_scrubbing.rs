//! Redaction of credentials in log output.

use regex::Regex;
use std::fmt;

/// Removes GitHub credentials from text before it reaches a log line.
///
/// Tracker error bodies and request failures can echo the Authorization
/// header or a token back; everything logged from them goes through here.
#[derive(Clone)]
pub struct SecretScrubber {
    github_token_pattern: Regex,
    auth_header_pattern: Regex,
    token_field_pattern: Regex,
}

impl SecretScrubber {
    /// Create a new secret scrubber
    pub fn new() -> Self {
        Self {
            // Classic and fine-grained GitHub tokens: ghp_..., gho_..., github_pat_...
            github_token_pattern: Regex::new(r"\b(?:gh[pousr]_[A-Za-z0-9]{20,}|github_pat_[A-Za-z0-9_]{20,})")
                .expect("github token pattern must compile"),
            // Authorization header values in either scheme
            auth_header_pattern: Regex::new(r"(?i)\b(bearer|token)\s+[A-Za-z0-9\-_\.]{8,}")
                .expect("auth header pattern must compile"),
            // JSON or query-string fields carrying a token
            token_field_pattern: Regex::new(
                r#"(?i)["']?(access_token|token|secret)["']?\s*([:=])\s*["']?[A-Za-z0-9\-_\.]{8,}["']?"#,
            )
            .expect("token field pattern must compile"),
        }
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = self
            .github_token_pattern
            .replace_all(message, "[TOKEN_REDACTED]");
        let scrubbed = self
            .token_field_pattern
            .replace_all(&scrubbed, "$1$2[REDACTED]");
        self.auth_header_pattern
            .replace_all(&scrubbed, "$1 [TOKEN_REDACTED]")
            .into_owned()
    }
}

impl Default for SecretScrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
