//! Logger settings derived from [`LoggingConfig`].

use std::path::PathBuf;

use crate::domain::models::LoggingConfig;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (json, pretty)
    pub format: LogFormat,

    /// Directory for log files (optional, if None logs only to stdout)
    pub log_dir: Option<PathBuf>,

    /// Enable stdout logging
    pub enable_stdout: bool,

    /// Log rotation policy
    pub rotation: RotationPolicy,
}

/// Event encoding for every sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

/// How often the file sink starts a new file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RotationPolicy {
    /// New file each day.
    #[default]
    Daily,
    /// New file each hour.
    Hourly,
    /// A single file that grows forever.
    Never,
}

impl RotationPolicy {
    /// Unknown values fall back to daily.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "never" => Self::Never,
            _ => Self::Daily,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Json,
            log_dir: None,
            enable_stdout: true,
            rotation: RotationPolicy::default(),
        }
    }
}

impl From<&LoggingConfig> for LogConfig {
    /// Unknown formats and rotations fall back to the defaults;
    /// `ConfigLoader::validate` rejects them before this point.
    fn from(config: &LoggingConfig) -> Self {
        let format = if config.format.eq_ignore_ascii_case("pretty") {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        };
        Self {
            level: config.level.clone(),
            format,
            log_dir: config.log_dir.clone(),
            // Without a file sink stdout is the only place logs can go.
            enable_stdout: config.stdout || config.log_dir.is_none(),
            rotation: RotationPolicy::parse(&config.rotation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_logging_config() {
        let logging = LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
            log_dir: Some(PathBuf::from("/var/log/feedback")),
            ..LoggingConfig::default()
        };
        let config = LogConfig::from(&logging);
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.rotation, RotationPolicy::Daily);
        assert!(config.enable_stdout);
    }

    #[test]
    fn test_rotation_and_stdout_are_carried_over() {
        let logging = LoggingConfig {
            log_dir: Some(PathBuf::from("/var/log/feedback")),
            rotation: "hourly".to_string(),
            stdout: false,
            ..LoggingConfig::default()
        };
        let config = LogConfig::from(&logging);
        assert_eq!(config.rotation, RotationPolicy::Hourly);
        assert!(!config.enable_stdout);
    }

    #[test]
    fn test_stdout_stays_on_without_log_dir() {
        let logging = LoggingConfig {
            stdout: false,
            ..LoggingConfig::default()
        };
        assert!(LogConfig::from(&logging).enable_stdout);
    }

    #[test]
    fn test_rotation_policy_parse() {
        assert_eq!(RotationPolicy::parse("Never"), RotationPolicy::Never);
        assert_eq!(RotationPolicy::parse("hourly"), RotationPolicy::Hourly);
        assert_eq!(RotationPolicy::parse("weekly"), RotationPolicy::Daily);
    }
}
