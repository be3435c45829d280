//! Settings for the tree editor's mock child provider.
//!
//! Lazy nodes are filled by a provider that simulates a remote fetch: it
//! waits for a random latency, then returns a handful of generated children.
//! These settings control that simulation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default lower bound of the simulated fetch latency, in milliseconds.
pub const DEFAULT_MIN_LATENCY_MS: u64 = 600;

/// Default upper bound of the simulated fetch latency, in milliseconds.
pub const DEFAULT_MAX_LATENCY_MS: u64 = 1200;

/// Default maximum number of children returned by one fetch.
pub const DEFAULT_MAX_MOCK_CHILDREN: usize = 4;

/// Default probability that a generated child is itself lazy.
pub const DEFAULT_LAZY_PROBABILITY: f64 = 0.55;

/// Inclusive range of simulated fetch latencies.
///
/// # Examples
///
/// ```
/// use trellis_config::LatencyRange;
///
/// let range = LatencyRange::fixed(250);
/// assert_eq!(range.min, range.max);
/// assert!(range.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyRange {
    /// Shortest latency, in milliseconds.
    #[serde(default = "default_min")]
    pub min: u64,
    /// Longest latency, in milliseconds.
    #[serde(default = "default_max")]
    pub max: u64,
}

fn default_min() -> u64 {
    DEFAULT_MIN_LATENCY_MS
}

fn default_max() -> u64 {
    DEFAULT_MAX_LATENCY_MS
}

impl Default for LatencyRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_LATENCY_MS,
            max: DEFAULT_MAX_LATENCY_MS,
        }
    }
}

impl LatencyRange {
    /// Creates a range that always yields the same latency.
    #[must_use]
    pub fn fixed(ms: u64) -> Self {
        Self { min: ms, max: ms }
    }

    /// Returns the bounds as durations.
    #[must_use]
    pub fn bounds(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.min),
            Duration::from_millis(self.max),
        )
    }

    /// Validates the range.
    ///
    /// # Errors
    ///
    /// Returns an error if `min` exceeds `max`.
    pub fn validate(&self) -> Result<()> {
        if self.min > self.max {
            return Err(ConfigError::InvalidLatency {
                reason: format!("min {} ms exceeds max {} ms", self.min, self.max),
            });
        }
        Ok(())
    }
}

/// Configuration for the tree editor.
///
/// # Examples
///
/// ```
/// use trellis_config::TreeConfig;
///
/// let config = TreeConfig::default();
/// assert_eq!(config.max_mock_children, 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Simulated latency of each child fetch.
    #[serde(default)]
    pub fetch_latency_ms: LatencyRange,

    /// Upper bound on children generated per fetch (at least one is always
    /// generated).
    #[serde(default = "default_max_mock_children")]
    pub max_mock_children: usize,

    /// Probability in `[0, 1]` that a generated child is itself lazy.
    #[serde(default = "default_lazy_probability")]
    pub lazy_probability: f64,
}

fn default_max_mock_children() -> usize {
    DEFAULT_MAX_MOCK_CHILDREN
}

fn default_lazy_probability() -> f64 {
    DEFAULT_LAZY_PROBABILITY
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            fetch_latency_ms: LatencyRange::default(),
            max_mock_children: DEFAULT_MAX_MOCK_CHILDREN,
            lazy_probability: DEFAULT_LAZY_PROBABILITY,
        }
    }
}

impl TreeConfig {
    /// Validates the tree configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the latency range is inverted, if
    /// `max_mock_children` is zero, or if `lazy_probability` is outside
    /// `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        self.fetch_latency_ms.validate()?;

        if self.max_mock_children == 0 {
            return Err(ConfigError::InvalidTreeSetting {
                field: "max_mock_children",
                reason: "must be at least 1".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.lazy_probability) {
            return Err(ConfigError::InvalidTreeSetting {
                field: "lazy_probability",
                reason: format!("{} is not within 0..=1", self.lazy_probability),
            });
        }

        Ok(())
    }
}
