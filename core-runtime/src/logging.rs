//! # Logging Infrastructure
//!
//! Configures structured logging over `tracing`/`tracing-subscriber`.
//!
//! The default level is INFO; `RUST_LOG`-style directives may override it
//! per module (e.g. `core_library=debug,sqlx=warn`). Pretty output is the
//! default in debug builds, JSON in release builds.

use crate::error::{Error, Result};
use tracing::Level;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors
    Pretty,
    /// Structured JSON for machine parsing
    Json,
    /// Single-line format for production consoles
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Json;
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Minimum level when no filter directives are given
    pub level: Level,
    /// Custom filter directives (e.g. "core_library=debug,sqlx=warn")
    pub filter: Option<String>,
    /// Display the emitting module in output
    pub display_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: Level::INFO,
            filter: None,
            display_target: true,
        }
    }
}

impl LoggingConfig {
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

/// Initialize the global tracing subscriber.
///
/// Returns an error if the filter directives are malformed or a subscriber
/// is already installed.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = match &config.filter {
        Some(directives) => EnvFilter::try_new(directives)
            .map_err(|e| Error::Config(format!("invalid log filter '{directives}': {e}")))?,
        None => EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(config.level).into())
            .from_env_lossy(),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.display_target);

    let result = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    result.map_err(|e| Error::Internal(format!("failed to initialize logging: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(config.filter.is_none());
        assert!(config.display_target);
    }

    #[test]
    fn test_builder_methods() {
        let config = LoggingConfig::default()
            .with_format(LogFormat::Compact)
            .with_level(Level::DEBUG)
            .with_filter("core_library=trace");

        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.level, Level::DEBUG);
        assert_eq!(config.filter.as_deref(), Some("core_library=trace"));
    }

    #[test]
    fn test_invalid_filter_directives_are_rejected() {
        let config = LoggingConfig::default().with_filter("core_library=notalevel");
        let result = init_logging(config);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
