//! Layered configuration loading and validation.

use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use thiserror::Error;

use crate::domain::models::config::Config;

/// Default configuration file, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "feedback.yaml";

/// Variables read verbatim as strings, in increasing precedence.
///
/// Figment's `Env` provider parses values, which turns an all-digit token
/// into a number (dropping leading zeros) and fails extraction.
const STRING_ENV_VARS: [(&str, &str); 6] = [
    ("FEEDBACK_GITHUB__TOKEN", "github.token"),
    ("FEEDBACK_GITHUB__REPO", "github.repo"),
    ("FEEDBACK_GITHUB__ALLOWED_REPOS", "github.allowed_repos"),
    ("GH_TOKEN", "github.token"),
    ("REPO", "github.repo"),
    ("ALLOWED_REPOS", "github.allowed_repos"),
];

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No GitHub token was configured.
    #[error("GitHub token is missing. Set github.token, FEEDBACK_GITHUB__TOKEN or GH_TOKEN")]
    MissingToken,

    /// The target repository is not `owner/repo`.
    #[error("Invalid repo: {0:?}. Must be of the form owner/repo")]
    InvalidRepo(String),

    /// The outbound call timeout is zero.
    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    /// The listen port is zero.
    #[error("Invalid port: {0}. Must be between 1 and 65535")]
    InvalidPort(u16),

    /// Unknown log level.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown log format.
    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    /// Unknown log file rotation policy.
    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    /// Any other invalid combination of settings.
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `feedback.yaml` in the working directory (optional)
    /// 3. Environment variables (`FEEDBACK_*` prefix, `__` separates sections)
    /// 4. Deployment variables `GH_TOKEN`, `REPO` and `ALLOWED_REPOS`
    pub fn load() -> Result<Config> {
        let config: Config = Self::figment(Path::new(DEFAULT_CONFIG_FILE))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, with the same environment
    /// overrides as [`ConfigLoader::load`].
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config: Config = Self::figment(path)
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment(path: &Path) -> Figment {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(
                Env::prefixed("FEEDBACK_")
                    .split("__")
                    .filter(|key| !is_string_env_key(key.as_str())),
            );

        STRING_ENV_VARS
            .iter()
            .fold(figment, |figment, (var, key)| match std::env::var(var) {
                Ok(value) => figment.merge(Serialized::default(key, value)),
                Err(_) => figment,
            })
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.github.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }

        if !is_repo_name(&config.github.repo) {
            return Err(ConfigError::InvalidRepo(config.github.repo.clone()));
        }

        if config.github.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.github.timeout_secs));
        }

        if config.github.api_base.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "github.api_base cannot be empty".to_string(),
            ));
        }

        if config.server.port == 0 {
            return Err(ConfigError::InvalidPort(config.server.port));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(config.logging.rotation.clone()));
        }

        if !config.logging.stdout && config.logging.log_dir.is_none() {
            return Err(ConfigError::ValidationFailed(
                "logging.stdout is false and logging.log_dir is unset; logs would go nowhere"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

/// Whether `key` names one of [`STRING_ENV_VARS`], in raw, prefix-stripped
/// or dotted form.
fn is_string_env_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    let key = key.strip_prefix("feedback_").unwrap_or(&key).replace("__", ".");
    STRING_ENV_VARS
        .iter()
        .any(|(var, path)| var.starts_with("FEEDBACK_") && key == *path)
}

/// `owner/repo` with both halves non-empty and no whitespace.
fn is_repo_name(repo: &str) -> bool {
    match repo.split_once('/') {
        Some((owner, name)) => {
            !owner.is_empty()
                && !name.is_empty()
                && !name.contains('/')
                && !repo.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
