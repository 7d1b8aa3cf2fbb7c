//! Browser and operating system facts derived from a user-agent string.
//!
//! Rules are checked in order and the first match wins, so more specific
//! products (Edge, Opera) are listed ahead of the engines they embed
//! (Chrome, Safari).

use std::sync::LazyLock;

use regex::Regex;

/// Ordered `(fact, value)` pairs. Unknown facts are never present.
pub type Facts = Vec<(&'static str, String)>;

/// Facts extracted from a single user-agent string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientMetadata {
    /// `name`, `version`, `major` (whichever are known).
    pub browser: Facts,
    /// `name`, `version` (whichever are known).
    pub os: Facts,
}

struct Rule {
    name: &'static str,
    pattern: Regex,
}

impl Rule {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("user-agent pattern must compile"),
        }
    }

    /// Returns the product name and the captured version, if any.
    fn capture(&self, user_agent: &str) -> Option<(&'static str, Option<String>)> {
        let caps = self.pattern.captures(user_agent)?;
        let version = caps.get(1).map(|m| m.as_str().replace('_', "."));
        Some((self.name, version))
    }
}

static BROWSER_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new("Edge", r"Edg(?:e|A|iOS)?/([\d.]+)"),
        Rule::new("Opera", r"(?:OPR|Opera)/([\d.]+)"),
        Rule::new("Samsung Browser", r"SamsungBrowser/([\d.]+)"),
        Rule::new("Firefox", r"(?:Firefox|FxiOS)/([\d.]+)"),
        Rule::new("Chrome", r"(?:Chrome|CriOS)/([\d.]+)"),
        Rule::new("Mobile Safari", r"Version/([\d.]+).*Mobile/\S+ Safari/"),
        Rule::new("Safari", r"Version/([\d.]+).*Safari/"),
        Rule::new("IE", r"(?:MSIE |Trident/.*rv:)([\d.]+)"),
    ]
});

static OS_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new("Windows", r"Windows NT ([\d.]+)"),
        Rule::new("iOS", r"(?:iPhone|iPad|iPod).*? OS ([\d_]+)"),
        Rule::new("Mac OS", r"Mac OS X ?([\d_.]+)?"),
        Rule::new("Android", r"Android ?([\d.]+)?"),
        Rule::new("Chromium OS", r"CrOS \S+ ([\d.]+)"),
        Rule::new("Ubuntu", r"Ubuntu"),
        Rule::new("Linux", r"Linux"),
    ]
});

/// Derive browser and OS facts from `user_agent`.
///
/// An unrecognised string yields empty fact lists, which render as no table.
pub fn extract_client_metadata(user_agent: &str) -> ClientMetadata {
    let mut metadata = ClientMetadata::default();

    if let Some((name, version)) = first_match(&BROWSER_RULES, user_agent) {
        metadata.browser.push(("name", name.to_string()));
        if let Some(version) = version.filter(|v| !v.is_empty()) {
            let major = version.split('.').next().unwrap_or_default().to_string();
            metadata.browser.push(("version", version));
            if !major.is_empty() {
                metadata.browser.push(("major", major));
            }
        }
    }

    if let Some((name, version)) = first_match(&OS_RULES, user_agent) {
        metadata.os.push(("name", name.to_string()));
        let version = match (name, version) {
            ("Windows", Some(nt)) => Some(windows_release(&nt).to_string()),
            (_, version) => version,
        };
        if let Some(version) = version.filter(|v| !v.is_empty()) {
            metadata.os.push(("version", version));
        }
    }

    metadata
}

fn first_match(rules: &[Rule], user_agent: &str) -> Option<(&'static str, Option<String>)> {
    rules.iter().find_map(|rule| rule.capture(user_agent))
}

/// Marketing name for a Windows NT kernel version.
fn windows_release(nt_version: &str) -> &str {
    match nt_version {
        "10.0" => "10",
        "6.3" => "8.1",
        "6.2" => "8",
        "6.1" => "7",
        "6.0" => "Vista",
        "5.1" | "5.2" => "XP",
        other => other,
    }
}
