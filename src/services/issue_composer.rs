//! Issue document composition.
//!
//! Every optional section is computed up front into an [`IssueView`], which
//! is then rendered in a single pass. Sections whose source data is missing
//! or empty are left out entirely, so the body stays well-formed Markdown
//! even for a bare submission.

use crate::domain::errors::{FeedbackError, FeedbackResult};
use crate::domain::models::{FeedbackSubmission, RenderedIssue, RequestContext};

use super::client_metadata::extract_client_metadata;
use super::table_renderer::{render_key_value_table, render_table};

/// Request headers that may appear in the Client Details section.
pub const HEADER_ALLOWLIST: [&str; 3] = ["user-agent", "origin", "referer"];

/// Length of a title derived from the feedback body.
pub const FALLBACK_TITLE_CHARS: usize = 25;

/// Appended to a derived title when the body was cut.
pub const TRUNCATION_MARKER: &str = "…";

/// Everything the template needs, computed before rendering starts.
#[derive(Debug, Clone, PartialEq, Eq)]
struct IssueView {
    suffix: String,
    body: String,
    screenshot_url: Option<String>,
    header_table: String,
    browser_table: String,
    os_table: String,
    perspective_table: String,
    extra_table: String,
}

impl IssueView {
    fn build(submission: &FeedbackSubmission, context: Option<&RequestContext>) -> Self {
        let suffix = context
            .and_then(|ctx| ctx.referer.as_deref())
            .map(|referer| format!(" on {}", escape_html(referer)))
            .unwrap_or_default();

        let header_table = context.map_or_else(String::new, |ctx| {
            let rows = ctx
                .headers
                .iter()
                .filter(|(name, _)| HEADER_ALLOWLIST.contains(&name.as_str()))
                .map(|(name, value)| vec![name.clone(), value.clone()])
                .collect();
            render_table(&["Header", "Value"], rows, true)
        });

        let user_agent = context.and_then(|ctx| {
            ctx.user_agent
                .as_deref()
                .or_else(|| ctx.headers.get("user-agent").map(String::as_str))
        });
        let (browser_table, os_table) = user_agent.map_or_else(
            || (String::new(), String::new()),
            |ua| {
                let metadata = extract_client_metadata(ua);
                (
                    render_key_value_table(metadata.browser, false),
                    render_key_value_table(metadata.os, false),
                )
            },
        );

        let perspective_table = submission
            .perspective
            .as_ref()
            .map(|entries| render_key_value_table(entries.clone(), true))
            .unwrap_or_default();
        let extra_table = submission
            .extra
            .as_ref()
            .map(|entries| render_key_value_table(entries.clone(), true))
            .unwrap_or_default();

        Self {
            suffix,
            body: escape_html(&submission.body),
            screenshot_url: submission
                .screenshot_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string),
            header_table,
            browser_table,
            os_table,
            perspective_table,
            extra_table,
        }
    }

    fn render(&self) -> String {
        let mut sections = vec![
            format!(":bulb: New feedback was posted{}", self.suffix),
            format!("## Feedback\n\n{}", self.body),
        ];

        if let Some(url) = &self.screenshot_url {
            sections.push(format!("## Screenshot\n\n![Screenshot]({url})"));
        }

        let details: Vec<String> = [
            ("Headers", &self.header_table),
            ("Browser", &self.browser_table),
            ("Operating System", &self.os_table),
            ("Perspective API", &self.perspective_table),
            ("Extra information", &self.extra_table),
        ]
        .into_iter()
        .filter(|(_, table)| !table.is_empty())
        .map(|(heading, table)| format!("### {heading}\n\n{table}"))
        .collect();

        if !details.is_empty() {
            sections.push(format!(
                "<details><summary>Client Details</summary><p>\n\n{}\n\n</p></details>",
                details.join("\n\n")
            ));
        }

        let mut rendered = sections.join("\n\n");
        rendered.push('\n');
        rendered
    }
}

/// Build the issue title and Markdown body for a submission.
///
/// Pure: the same submission and context always produce byte-identical
/// output. Fails with `InvalidSubmission` when the body is blank.
pub fn compose_issue(
    submission: &FeedbackSubmission,
    context: Option<&RequestContext>,
) -> FeedbackResult<RenderedIssue> {
    if submission.body.trim().is_empty() {
        return Err(FeedbackError::InvalidSubmission(
            "\"body\" is required".to_string(),
        ));
    }

    let view = IssueView::build(submission, context);
    Ok(RenderedIssue {
        title: issue_title(submission),
        body: view.render(),
    })
}

/// The explicit title when one was given, otherwise a truncated body.
pub fn issue_title(submission: &FeedbackSubmission) -> String {
    submission
        .title
        .as_deref()
        .filter(|title| !title.trim().is_empty())
        .map_or_else(
            || truncate_chars(&submission.body, FALLBACK_TITLE_CHARS),
            str::to_string,
        )
}

/// Keep the first `max_chars` characters, marking the cut with an ellipsis.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &text[..cut]),
        None => text.to_string(),
    }
}

/// Escapes `& < > " ' / \` =` as HTML entities, so user text cannot open
/// tags, attributes or Markdown code spans in the rendered issue.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '/' => escaped.push_str("&#x2F;"),
            '`' => escaped.push_str("&#x60;"),
            '=' => escaped.push_str("&#x3D;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIREFOX_UA: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0";

    fn full_context() -> RequestContext {
        RequestContext::from_headers([
            ("user-agent", FIREFOX_UA),
            ("origin", "https://app.example.com"),
            ("referer", "https://app.example.com/settings"),
            ("cookie", "session=secret"),
        ])
    }

    #[test]
    fn test_bare_submission_has_only_feedback_section() {
        let issue = compose_issue(&FeedbackSubmission::new("Button broken"), None).unwrap();
        assert_eq!(issue.title, "Button broken");
        assert_eq!(
            issue.body,
            ":bulb: New feedback was posted\n\n## Feedback\n\nButton broken\n"
        );
        for absent in ["Screenshot", "Headers", "Browser", "Operating System", "Extra", "<details>"] {
            assert!(!issue.body.contains(absent), "unexpected section {absent}");
        }
    }

    #[test]
    fn test_screenshot_is_the_only_optional_section() {
        let submission = FeedbackSubmission::new("X").with_screenshot_url("http://s/1.png");
        let issue = compose_issue(&submission, None).unwrap();
        assert!(issue.body.contains("![Screenshot](http://s/1.png)"));
        assert!(!issue.body.contains("<details>"));
        assert!(!issue.body.contains("###"));
    }

    #[test]
    fn test_long_body_title_is_truncated_with_marker() {
        let submission = FeedbackSubmission::new("This is a very long feedback message");
        let issue = compose_issue(&submission, None).unwrap();
        assert_eq!(issue.title, "This is a very long feedb…");
        assert_eq!(issue.title.chars().count(), FALLBACK_TITLE_CHARS + 1);
        assert_eq!(issue_title(&submission), issue.title);
    }

    #[test]
    fn test_title_truncation_respects_char_boundaries() {
        let body = "é".repeat(30);
        let title = issue_title(&FeedbackSubmission::new(body));
        assert_eq!(title, format!("{}…", "é".repeat(25)));
    }

    #[test]
    fn test_explicit_title_is_used_verbatim() {
        let submission = FeedbackSubmission::new("This is a very long feedback message")
            .with_title("  Crash on save  ");
        assert_eq!(issue_title(&submission), "  Crash on save  ");
    }

    #[test]
    fn test_blank_title_falls_back_to_body() {
        let submission = FeedbackSubmission::new("Short").with_title("   ");
        assert_eq!(issue_title(&submission), "Short");
    }

    #[test]
    fn test_blank_body_is_invalid() {
        let err = compose_issue(&FeedbackSubmission::new("  \n"), None).unwrap_err();
        assert!(matches!(err, FeedbackError::InvalidSubmission(_)));
    }

    #[test]
    fn test_referer_adds_suffix_and_headers_are_allowlisted() {
        let issue = compose_issue(&FeedbackSubmission::new("Hi"), Some(&full_context())).unwrap();
        assert!(issue
            .body
            .starts_with(":bulb: New feedback was posted on https:&#x2F;&#x2F;app.example.com&#x2F;settings\n"));
        assert!(issue.body.contains("### Headers"));
        assert!(issue.body.contains("| origin "));
        assert!(!issue.body.contains("cookie"));
        assert!(!issue.body.contains("session=secret"));
    }

    #[test]
    fn test_sections_follow_fixed_order() {
        let submission = FeedbackSubmission::new("Hi")
            .with_screenshot_url("https://s/1.png")
            .with_extra("plan", "pro")
            .with_perspective("TOXICITY", "0.02");
        let issue = compose_issue(&submission, Some(&full_context())).unwrap();

        let order = [
            "## Feedback",
            "## Screenshot",
            "<details><summary>Client Details</summary><p>",
            "### Headers",
            "### Browser",
            "### Operating System",
            "### Perspective API",
            "### Extra information",
            "</p></details>",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|marker| issue.body.find(marker).unwrap_or_else(|| panic!("missing {marker}")))
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(issue.body.contains("| name    | Firefox |"));
        assert!(issue.body.contains("| plan | pro   |"));
    }

    #[test]
    fn test_empty_extra_map_is_omitted() {
        let mut submission = FeedbackSubmission::new("Hi");
        submission.extra = Some(Default::default());
        let issue = compose_issue(&submission, None).unwrap();
        assert!(!issue.body.contains("Extra information"));
        assert!(!issue.body.contains("<details>"));
    }

    #[test]
    fn test_body_markup_is_escaped() {
        let issue =
            compose_issue(&FeedbackSubmission::new("<script>alert('x')</script> & co"), None).unwrap();
        assert!(issue
            .body
            .contains("&lt;script&gt;alert(&#39;x&#39;)&lt;&#x2F;script&gt; &amp; co"));
        assert!(!issue.body.contains("<script>"));
    }

    #[test]
    fn test_attribute_and_code_span_characters_are_escaped() {
        let issue = compose_issue(
            &FeedbackSubmission::new("<img src=x onerror=`run`/> a/b"),
            None,
        )
        .unwrap();
        assert!(issue.body.contains(
            "&lt;img src&#x3D;x onerror&#x3D;&#x60;run&#x60;&#x2F;&gt; a&#x2F;b"
        ));
        for raw in ["=", "`"] {
            assert!(!issue.body.contains(raw), "unescaped {raw}");
        }
    }

    #[test]
    fn test_composition_is_deterministic() {
        let submission = FeedbackSubmission::new("Same input")
            .with_extra("b", "2")
            .with_extra("a", "1");
        let context = full_context();
        let first = compose_issue(&submission, Some(&context)).unwrap();
        let second = compose_issue(&submission.clone(), Some(&context.clone())).unwrap();
        assert_eq!(first, second);
    }
}
