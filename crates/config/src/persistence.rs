//! Configuration file reading and writing.
//!
//! This module handles loading configuration from files and saving
//! configuration back to files.
//!
//! # File Formats
//!
//! The module supports both JSON5 and JSON formats:
//!
//! - JSON5 (`.json5`): Preferred format with comments and trailing commas
//! - JSON (`.json`): Standard JSON format
//!
//! # File Locations
//!
//! Configuration is searched in the following order:
//!
//! 1. Local: `./trellis.json5` or `./trellis.json`
//! 2. User: `~/.config/trellis/config.json5` or `~/.config/trellis/config.json`

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Configuration file names to search for, in priority order.
const CONFIG_FILE_NAMES: &[&str] = &["trellis.json5", "trellis.json"];

/// User config directory name.
const USER_CONFIG_DIR: &str = "trellis";

/// User config file names to search for, in priority order.
const USER_CONFIG_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Finds the configuration file path.
///
/// Searches in the following order:
///
/// 1. Local directory: `./trellis.json5`, `./trellis.json`
/// 2. User config directory: `~/.config/trellis/config.json5`, `~/.config/trellis/config.json`
///
/// # Returns
///
/// Returns `Some(path)` if a config file is found, `None` otherwise.
///
/// # Examples
///
/// ```no_run
/// use trellis_config::persistence::find_config_file;
///
/// if let Some(path) = find_config_file() {
///     println!("Found config at: {}", path.display());
/// }
/// ```
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    find_config_file_in(Path::new("."), dirs::config_dir().as_deref())
}

/// Searches for a configuration file relative to explicit directories.
///
/// `local_dir` stands in for the working directory and `config_dir` for the
/// platform config directory (the `trellis` subdirectory is appended).
#[must_use]
pub fn find_config_file_in(local_dir: &Path, config_dir: Option<&Path>) -> Option<PathBuf> {
    let local = CONFIG_FILE_NAMES.iter().map(|name| local_dir.join(name));
    let user = config_dir
        .map(|dir| dir.join(USER_CONFIG_DIR))
        .into_iter()
        .flat_map(|dir| USER_CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)));

    local.chain(user).find(|path| path.exists())
}

/// Returns the default user configuration directory.
///
/// This is typically `~/.config/trellis/` on Unix systems.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
///
/// # Examples
///
/// ```no_run
/// use trellis_config::persistence::user_config_dir;
///
/// let dir = user_config_dir().unwrap();
/// println!("User config dir: {}", dir.display());
/// ```
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(USER_CONFIG_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Returns the default user configuration file path.
///
/// This is typically `~/.config/trellis/config.json5`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
///
/// # Examples
///
/// ```no_run
/// use trellis_config::persistence::default_user_config_path;
///
/// let path = default_user_config_path().unwrap();
/// println!("Default config path: {}", path.display());
/// ```
pub fn default_user_config_path() -> Result<PathBuf> {
    Ok(user_config_dir()?.join("config.json5"))
}

/// Reads and parses a configuration file.
///
/// Supports both JSON5 and JSON formats.
///
/// # Arguments
///
/// * `path` - The path to the configuration file
///
/// # Type Parameters
///
/// * `T` - The type to deserialize into (must implement `serde::Deserialize`)
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file content cannot be parsed
///
/// # Examples
///
/// ```no_run
/// use trellis_config::persistence::read_config_file;
/// use trellis_config::Config;
///
/// # fn main() -> trellis_config::Result<()> {
/// let config: Config = read_config_file("trellis.json5")?;
/// # Ok(())
/// # }
/// ```
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    // JSON5 parser handles both JSON5 and JSON
    serde_json5::from_str(&content).map_err(ConfigError::from)
}

/// Writes a configuration to a file.
///
/// The configuration is written as pretty-printed JSON (not JSON5, as
/// serde_json5 doesn't support serialization to JSON5 format).
///
/// # Arguments
///
/// * `path` - The path to write to
/// * `config` - The configuration to write
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The file cannot be written
/// - The configuration cannot be serialized
///
/// # Examples
///
/// ```no_run
/// use trellis_config::persistence::write_config_file;
/// use trellis_config::Config;
///
/// # fn main() -> trellis_config::Result<()> {
/// let config = Config::default();
/// write_config_file("trellis.json", &config)?;
/// # Ok(())
/// # }
/// ```
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, config: &T) -> Result<()> {
    let path = path.as_ref();

    // Create parent directories if needed
    if let Some(parent) = path.parent().filter(|p| !p.exists()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    // Serialize to pretty JSON
    let content = serde_json::to_string_pretty(config)?;

    std::fs::write(path, content).map_err(|e| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Latency {
        min: u64,
        max: u64,
    }

    #[test]
    fn reads_plain_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latency.json");
        std::fs::write(&path, r#"{"min": 10, "max": 20}"#).unwrap();

        let latency: Latency = read_config_file(&path).unwrap();
        assert_eq!(latency, Latency { min: 10, max: 20 });
    }

    #[test]
    fn reads_json5_with_comments() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latency.json5");
        std::fs::write(
            &path,
            r#"
            {
                // milliseconds
                min: 10,
                max: 20,
            }
            "#,
        )
        .unwrap();

        let latency: Latency = read_config_file(&path).unwrap();
        assert_eq!(latency.max, 20);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_config_file::<Latency>("/nonexistent/trellis.json").unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { ref path, .. } if path.ends_with("trellis.json")));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json5");
        std::fs::write(&path, "{ min: ").unwrap();

        let err = read_config_file::<Latency>(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseJson5(_)));
    }

    #[test]
    fn write_is_pretty_and_readable_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        write_config_file(&path, &Latency { min: 1, max: 2 }).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains('\n'));
        let back: Latency = read_config_file(&path).unwrap();
        assert_eq!(back, Latency { min: 1, max: 2 });
    }

    #[test]
    fn local_file_takes_priority() {
        let local = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        std::fs::create_dir_all(user.path().join(USER_CONFIG_DIR)).unwrap();
        std::fs::write(user.path().join(USER_CONFIG_DIR).join("config.json5"), "{}").unwrap();

        let found = find_config_file_in(local.path(), Some(user.path())).unwrap();
        assert!(found.starts_with(user.path()));

        std::fs::write(local.path().join("trellis.json"), "{}").unwrap();
        let found = find_config_file_in(local.path(), Some(user.path())).unwrap();
        assert_eq!(found, local.path().join("trellis.json"));

        std::fs::write(local.path().join("trellis.json5"), "{}").unwrap();
        let found = find_config_file_in(local.path(), Some(user.path())).unwrap();
        assert_eq!(found, local.path().join("trellis.json5"));
    }

    #[test]
    fn no_config_file_found() {
        let local = TempDir::new().unwrap();
        assert!(find_config_file_in(local.path(), None).is_none());
    }

    #[test]
    fn user_config_dir_returns_path() {
        // This test may fail in environments without a home directory
        if dirs::config_dir().is_some() {
            let result = user_config_dir();
            assert!(result.is_ok());
            assert!(result.unwrap().ends_with(USER_CONFIG_DIR));
        }
    }
}
