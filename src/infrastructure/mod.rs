//! Infrastructure layer
//!
//! Process-level concerns around the core: configuration loading and
//! logging setup.

pub mod config;
pub mod logging;

pub use config::{ConfigError, ConfigLoader};
pub use logging::{LogConfig, LoggerImpl, SecretScrubber};
