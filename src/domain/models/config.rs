//! Service configuration: GitHub target, HTTP server and logging.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for the feedback service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// GitHub repository and credential configuration
    #[serde(default)]
    pub github: GitHubConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// GitHub configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GitHubConfig {
    /// Personal access token used for every tracker call
    #[serde(default)]
    pub token: String,

    /// Target repository as `owner/repo`
    #[serde(default)]
    pub repo: String,

    /// Repositories feedback may be filed into
    #[serde(default)]
    pub allowed_repos: AllowedRepos,

    /// Base URL for the REST API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// GraphQL endpoint; derived from `api_base` when unset
    #[serde(default)]
    pub graphql_url: Option<String>,

    /// Timeout applied to each outbound call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            repo: String::new(),
            allowed_repos: AllowedRepos::default(),
            api_base: default_api_base(),
            graphql_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GitHubConfig {
    /// GraphQL endpoint used by the duplicate search.
    pub fn graphql_endpoint(&self) -> String {
        self.graphql_url.clone().unwrap_or_else(|| {
            format!("{}/graphql", self.api_base.trim_end_matches('/'))
        })
    }
}

/// Repositories the service is allowed to file into.
///
/// Accepts `"*"`, a comma-separated string, or a list of `owner/repo` names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AllowedReposRaw", into = "AllowedReposRaw")]
pub enum AllowedRepos {
    /// Every repository is allowed.
    #[default]
    All,
    /// Only the listed repositories are allowed.
    Only(Vec<String>),
}

impl AllowedRepos {
    /// Parse the textual form used by environment variables.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "*" {
            return Self::All;
        }
        Self::from_names(trimmed.split(','))
    }

    fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        if names.iter().any(|name| name == "*") {
            Self::All
        } else {
            Self::Only(names)
        }
    }

    /// Whether feedback may be filed into `repo`.
    pub fn permits(&self, repo: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(names) => names.iter().any(|name| name == repo),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum AllowedReposRaw {
    List(Vec<String>),
    Text(String),
}

impl From<AllowedReposRaw> for AllowedRepos {
    fn from(raw: AllowedReposRaw) -> Self {
        match raw {
            AllowedReposRaw::Text(text) => Self::parse(&text),
            AllowedReposRaw::List(names) => Self::from_names(names),
        }
    }
}

impl From<AllowedRepos> for AllowedReposRaw {
    fn from(repos: AllowedRepos) -> Self {
        match repos {
            AllowedRepos::All => Self::Text("*".to_string()),
            AllowedRepos::Only(names) => Self::List(names),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to enable permissive CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: default_true(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rotated log files; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// File rotation under `log_dir`: daily, hourly or never
    #[serde(default = "default_log_rotation")]
    pub rotation: String,

    /// Also write to stdout when `log_dir` is set
    #[serde(default = "default_true")]
    pub stdout: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_log_rotation(),
            stdout: true,
        }
    }
}
