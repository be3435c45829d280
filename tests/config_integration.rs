//! Integration tests for the trellis-config crate.

use std::fs;
use tempfile::TempDir;
use trellis_config::persistence::find_config_file_in;
use trellis_config::{Config, ConfigError, LatencyRange, LoggingConfig, TreeConfig};

#[test]
fn config_load_from_json5_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("trellis.json5");

    fs::write(
        &config_path,
        r#"
        {
            // Faster fetches for demos
            tree: {
                fetch_latency_ms: { min: 100, max: 200 },
                max_mock_children: 6,
                lazy_probability: 0.25,
            },
            logging: { level: "debug", directory: "/tmp/trellis-logs" },
        }
        "#,
    )
    .unwrap();

    let config = Config::load_from(&config_path).unwrap();

    assert_eq!(config.tree.fetch_latency_ms, LatencyRange { min: 100, max: 200 });
    assert_eq!(config.tree.max_mock_children, 6);
    assert!((config.tree.lazy_probability - 0.25).abs() < f64::EPSILON);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(
        config.logging.directory.as_deref(),
        Some(std::path::Path::new("/tmp/trellis-logs"))
    );
}

#[test]
fn config_missing_sections_use_defaults() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("trellis.json5");
    fs::write(&config_path, "{ tree: { max_mock_children: 2 } }").unwrap();

    let config = Config::load_from(&config_path).unwrap();

    assert_eq!(config.tree.max_mock_children, 2);
    assert_eq!(config.tree.fetch_latency_ms, LatencyRange::default());
    assert_eq!(config.logging, LoggingConfig::default());
}

#[test]
fn config_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("nested").join("config.json");

    let original = Config {
        tree: TreeConfig {
            fetch_latency_ms: LatencyRange::fixed(0),
            max_mock_children: 3,
            lazy_probability: 1.0,
        },
        logging: LoggingConfig {
            level: "warn".to_string(),
            directory: None,
        },
    };

    original.save_to(&config_path).unwrap();
    let loaded = Config::load_from(&config_path).unwrap();

    assert_eq!(original, loaded);

    // Written back as plain JSON.
    let raw = fs::read_to_string(&config_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["tree"]["max_mock_children"], 3);
}

#[test]
fn config_load_nonexistent_file_fails() {
    let dir = TempDir::new().unwrap();
    let result = Config::load_from(dir.path().join("missing.json5"));
    assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
}

#[test]
fn config_invalid_values_are_rejected() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("trellis.json5");

    fs::write(&config_path, "{ tree: { fetch_latency_ms: { min: 900, max: 100 } } }").unwrap();
    assert!(matches!(
        Config::load_from(&config_path),
        Err(ConfigError::InvalidLatency { .. })
    ));

    fs::write(&config_path, "{ tree: { lazy_probability: 1.5 } }").unwrap();
    assert!(matches!(
        Config::load_from(&config_path),
        Err(ConfigError::InvalidTreeSetting { .. })
    ));

    fs::write(&config_path, "{ logging: { level: \"loud\" } }").unwrap();
    assert!(matches!(
        Config::load_from(&config_path),
        Err(ConfigError::InvalidLogLevel(_))
    ));
}

#[test]
fn config_malformed_json5_fails() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("trellis.json5");
    fs::write(&config_path, "{ tree: ").unwrap();

    assert!(matches!(
        Config::load_from(&config_path),
        Err(ConfigError::ParseJson5(_))
    ));
}

#[test]
fn local_config_wins_over_user_config() {
    let local = TempDir::new().unwrap();
    let user = TempDir::new().unwrap();
    fs::create_dir_all(user.path().join("trellis")).unwrap();
    fs::write(user.path().join("trellis").join("config.json5"), "{}").unwrap();

    let found = find_config_file_in(local.path(), Some(user.path())).unwrap();
    assert_eq!(found, user.path().join("trellis").join("config.json5"));

    fs::write(local.path().join("trellis.json"), "{}").unwrap();
    let found = find_config_file_in(local.path(), Some(user.path())).unwrap();
    assert_eq!(found, local.path().join("trellis.json"));
}
