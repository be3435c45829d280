//! Logging configuration.
//!
//! The terminal belongs to the UI, so logs always go to a file. This module
//! only describes where and how much; installing the subscriber is the
//! binary's job.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::persistence::user_config_dir;

/// Default log level when nothing else is configured.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Base name of the rolling log file.
pub const LOG_FILE_NAME: &str = "trellis.log";

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Configuration for log output.
///
/// # Examples
///
/// ```
/// use trellis_config::LoggingConfig;
///
/// let config = LoggingConfig::default();
/// assert_eq!(config.level, "info");
/// assert!(config.directory.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level filter (`trace`, `debug`, `info`, `warn`, `error`).
    #[serde(default = "default_level")]
    pub level: String,

    /// Directory for log files. Defaults to the user config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

fn default_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            directory: None,
        }
    }
}

impl LoggingConfig {
    /// Resolves the directory log files are written to.
    ///
    /// # Errors
    ///
    /// Returns an error if no directory is configured and the user config
    /// directory cannot be determined.
    pub fn resolved_directory(&self) -> Result<PathBuf> {
        match &self.directory {
            Some(dir) => Ok(dir.clone()),
            None => Ok(user_config_dir()?.join("logs")),
        }
    }

    /// Validates the logging configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the level is not a known level name.
    pub fn validate(&self) -> Result<()> {
        if LEVELS.contains(&self.level.to_ascii_lowercase().as_str()) {
            Ok(())
        } else {
            Err(ConfigError::InvalidLogLevel(self.level.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_case_insensitive() {
        let config = LoggingConfig {
            level: "DEBUG".to_string(),
            directory: None,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_level_rejected() {
        let config = LoggingConfig {
            level: "verbose".to_string(),
            directory: None,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLogLevel(level)) if level == "verbose"
        ));
    }

    #[test]
    fn explicit_directory_wins() {
        let config = LoggingConfig {
            directory: Some(PathBuf::from("/tmp/trellis-logs")),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_directory().unwrap(),
            PathBuf::from("/tmp/trellis-logs")
        );
    }

    #[test]
    fn directory_not_serialized_when_none() {
        let json = serde_json::to_string(&LoggingConfig::default()).unwrap();
        assert_eq!(json, r#"{"level":"info"}"#);
    }
}
