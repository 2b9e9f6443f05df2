//! Telemetry primitives shared across the Remora workspace.
//!
//! Centralises logging setup so every consumer (the session core, the
//! hosting shell, tests) adopts the same observability story.

use anyhow::{Result, anyhow};
use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, fmt};

/// Default logging target when `RUST_LOG` is not provided.
const DEFAULT_LOG_LEVEL: &str = "info";

static BUILD_SHA: OnceCell<String> = OnceCell::new();

/// Configure and install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the tracing subscriber cannot be installed (for
/// example, because another subscriber has already been set globally).
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    BUILD_SHA
        .set(config.build_sha.to_string())
        .ok()
        .or(Some(()));

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level));

    let install = |format: LogFormat| {
        let builder = fmt::fmt()
            .with_env_filter(env_filter.clone())
            .with_target(false)
            .with_thread_ids(false);

        match format {
            LogFormat::Json => builder.json().try_init(),
            LogFormat::Pretty => builder.pretty().try_init(),
        }
    };

    install(config.format).map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;

    Ok(())
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig<'a> {
    pub level: &'a str,
    pub format: LogFormat,
    pub build_sha: &'a str,
}

impl Default for LoggingConfig<'_> {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL,
            format: LogFormat::infer(),
            build_sha: build_sha(),
        }
    }
}

/// Available output formats for the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// Choose a sensible default for the current build.
    #[must_use]
    pub const fn infer() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

/// Access the build SHA recorded during logging initialisation.
#[must_use]
pub fn build_sha() -> &'static str {
    BUILD_SHA.get().map_or("dev", String::as_str)
}

/// Convenience helper for deriving the log format from configuration maps.
#[must_use]
pub fn log_format_from_config(config: Option<&serde_json::Value>) -> Option<LogFormat> {
    config
        .and_then(|value| value.get("log_format"))
        .and_then(|value| value.as_str())
        .map(|value| match value {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::infer(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_reads_config_maps() {
        let config = serde_json::json!({ "log_format": "json" });
        assert_eq!(log_format_from_config(Some(&config)), Some(LogFormat::Json));

        let config = serde_json::json!({ "log_format": "pretty" });
        assert_eq!(
            log_format_from_config(Some(&config)),
            Some(LogFormat::Pretty)
        );

        let config = serde_json::json!({ "log_format": "fancy" });
        assert_eq!(
            log_format_from_config(Some(&config)),
            Some(LogFormat::infer())
        );
    }

    #[test]
    fn log_format_absent_when_unconfigured() {
        assert_eq!(log_format_from_config(None), None);
        let config = serde_json::json!({});
        assert_eq!(log_format_from_config(Some(&config)), None);
    }

    #[test]
    fn build_sha_defaults_before_init() {
        // BUILD_SHA may or may not be set depending on test order; either
        // way the accessor must return a non-empty value.
        assert!(!build_sha().is_empty());
    }
}
