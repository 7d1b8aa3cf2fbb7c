//! Feedback submission and rendered issue models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single piece of feedback posted by a client.
///
/// `extra` and `perspective` are ordered maps so rendering never depends on
/// hash iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSubmission {
    /// Feedback text. Required and non-blank.
    #[serde(default)]
    pub body: String,
    /// Explicit issue title. Derived from `body` when absent.
    #[serde(default)]
    pub title: Option<String>,
    /// Free-form key/value details supplied by the client.
    #[serde(default)]
    pub extra: Option<BTreeMap<String, String>>,
    /// Link to a screenshot image.
    #[serde(default, rename = "screenshotURL")]
    pub screenshot_url: Option<String>,
    /// Classifier annotations (e.g. toxicity scores).
    #[serde(default)]
    pub perspective: Option<BTreeMap<String, String>>,
}

impl FeedbackSubmission {
    /// Create a submission with only a body.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Default::default()
        }
    }

    /// Set an explicit issue title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attach a screenshot link.
    pub fn with_screenshot_url(mut self, url: impl Into<String>) -> Self {
        self.screenshot_url = Some(url.into());
        self
    }

    /// Add one extra key/value detail.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Add one classifier score.
    pub fn with_perspective(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.perspective
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Read-only view of the inbound HTTP request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Header values keyed by lower-cased header name.
    pub headers: BTreeMap<String, String>,
    /// Non-blank `Referer` header.
    pub referer: Option<String>,
    /// Non-blank `User-Agent` header.
    pub user_agent: Option<String>,
}

impl RequestContext {
    /// Build a context from raw header pairs.
    ///
    /// Names are lower-cased; `referer` and `user_agent` are lifted out of
    /// the headers so callers don't have to look them up again.
    pub fn from_headers<I, K, V>(headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let headers: BTreeMap<String, String> = headers
            .into_iter()
            .map(|(name, value)| (name.as_ref().to_ascii_lowercase(), value.into()))
            .collect();
        let referer = non_blank(headers.get("referer"));
        let user_agent = non_blank(headers.get("user-agent"));
        Self {
            headers,
            referer,
            user_agent,
        }
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

/// Title and Markdown body ready to be filed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedIssue {
    /// Issue title.
    pub title: String,
    /// Markdown body, ending in a newline.
    pub body: String,
}

/// An existing issue returned by the duplicate search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerIssueRef {
    /// Repository holding the issue, as `owner/repo`.
    pub repo: String,
    /// Sequential number within the repository.
    pub number: u64,
    /// Issue title as stored by the tracker.
    pub title: String,
    /// Issue body; empty when the tracker returned none.
    #[serde(default)]
    pub body: String,
}
