//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates all
//! configuration options for the trellis application.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::logging::LoggingConfig;
use crate::persistence::{find_config_file, read_config_file, write_config_file};
use crate::tree::TreeConfig;

/// The main configuration struct for the trellis application.
///
/// # Examples
///
/// ```
/// use trellis_config::{Config, LatencyRange, TreeConfig};
///
/// let config = Config::default();
/// assert_eq!(config.logging.level, "info");
///
/// let config = Config {
///     tree: TreeConfig {
///         fetch_latency_ms: LatencyRange::fixed(0),
///         ..Default::default()
///     },
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Tree editor and mock provider settings.
    #[serde(default)]
    pub tree: TreeConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Creates a configuration with every setting at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the default file locations.
    ///
    /// Searches for configuration files in the following order:
    ///
    /// 1. Local: `./trellis.json5` or `./trellis.json`
    /// 2. User: `~/.config/trellis/config.json5` or `~/.config/trellis/config.json`
    ///
    /// Returns the loaded configuration together with the file it came from.
    /// If no configuration file is found, returns the defaults and `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read, parsed, or validated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use trellis_config::Config;
    ///
    /// # fn example() -> trellis_config::Result<()> {
    /// let (config, source) = Config::load()?;
    /// if let Some(path) = source {
    ///     println!("loaded {}", path.display());
    /// }
    /// println!("log level: {}", config.logging.level);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> Result<(Self, Option<PathBuf>)> {
        match find_config_file() {
            Some(path) => {
                let config = Self::load_from(&path)?;
                Ok((config, Some(path)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// values fail validation.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to a file as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure among the sections.
    pub fn validate(&self) -> Result<()> {
        self.tree.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
