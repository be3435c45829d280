use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use trellis_config::{LOG_FILE_NAME, LoggingConfig};

/// Environment variable overriding the configured log filter.
pub const LOG_ENV: &str = "TRELLIS_LOG";

/// Keeps the background log writer alive; logs are flushed when dropped.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// Builds the filter: `TRELLIS_LOG` when set and valid, else the configured
/// level for the trellis crates.
fn build_filter(level: &str, env: Option<&str>) -> EnvFilter {
    if let Some(directives) = env
        && let Ok(filter) = EnvFilter::try_new(directives)
    {
        return filter;
    }
    let level = level.to_ascii_lowercase();
    EnvFilter::new(format!(
        "trellis={level},trellis_tui={level},trellis_protocol={level},trellis_config={level}"
    ))
}

/// Installs the global subscriber writing to a daily rolling file.
///
/// Returns `None` when the log directory cannot be created or a subscriber
/// is already installed; the app then runs without logs.
pub fn init(config: &LoggingConfig) -> Option<LoggingGuard> {
    let log_dir = config
        .resolved_directory()
        .ok()
        .and_then(|dir| std::fs::create_dir_all(&dir).ok().map(|()| dir))
        .or_else(|| {
            let dir = std::env::temp_dir().join("trellis").join("logs");
            std::fs::create_dir_all(&dir).ok()?;
            Some(dir)
        })?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env = std::env::var(LOG_ENV).ok();
    let subscriber = tracing_subscriber::registry()
        .with(build_filter(&config.level, env.as_deref()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        );

    if subscriber.try_init().is_err() {
        return None;
    }

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    Some(LoggingGuard { _guard: guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_applies_to_trellis_crates() {
        let filter = build_filter("DEBUG", None).to_string();
        assert!(filter.contains("trellis_tui=debug"));
        assert!(filter.contains("trellis=debug"));
    }

    #[test]
    fn env_overrides_configured_level() {
        let filter = build_filter("info", Some("trellis_tui=trace")).to_string();
        assert_eq!(filter, "trellis_tui=trace");
    }

    #[test]
    fn invalid_env_falls_back() {
        let filter = build_filter("warn", Some("trellis_tui=[")).to_string();
        assert!(filter.contains("trellis_protocol=warn"));
    }
}
