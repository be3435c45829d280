//! Configuration management for the trellis application.
//!
//! This crate handles loading, validating, and persisting configuration.
//!
//! # Overview
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`tree`]: Mock child provider settings (latency, fan-out, laziness)
//! - [`logging`]: Log level and log directory
//! - [`persistence`]: Config file discovery, reading and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! 1. Local config (`./trellis.json5` or `./trellis.json`)
//! 2. User config (`~/.config/trellis/config.json5` or `~/.config/trellis/config.json`)
//! 3. Built-in defaults
//!
//! The `TRELLIS_LOG` environment variable overrides the configured log level
//! at startup; it is read by the binary, not by this crate.
//!
//! # Format
//!
//! ```json5
//! {
//!   tree: {
//!     fetch_latency_ms: { min: 600, max: 1200 },
//!     max_mock_children: 4,
//!     lazy_probability: 0.55,
//!   },
//!   logging: { level: "info" },
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod persistence;
pub mod tree;

// Re-export primary types at crate root for convenience
pub use config::Config;
pub use error::{ConfigError, Result};
pub use logging::{LOG_FILE_NAME, LoggingConfig};
pub use tree::{LatencyRange, TreeConfig};
