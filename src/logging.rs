//! Structured logging setup.
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! job of the binary (or a test). [`init_logging`] builds the usual stack: an
//! `EnvFilter` seeded from [`LoggingConfig::level`] and overridable through
//! `RUST_LOG`, with JSON output for production and pretty output for
//! development.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// The `logging` section of the application config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive: `trace`, `debug`, `info`, ... or `actionrouter=debug`
    pub level: String,
    pub format: LogFormat,
    /// Include file:line in events (dev only)
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// `RUST_LOG` wins over the configured level.
    pub fn env_filter(&self) -> Result<EnvFilter> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.level)
                .with_context(|| format!("invalid log level '{}'", self.level)),
        }
    }
}

/// Install the global subscriber.
///
/// Fails if the level does not parse or a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = config.env_filter()?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    match config.format {
        LogFormat::Json => builder
            .json()
            .with_current_span(true)
            .try_init()
            .map_err(|e| anyhow!(e))?,
        LogFormat::Pretty => builder.pretty().try_init().map_err(|e| anyhow!(e))?,
    }

    tracing::debug!(level = %config.level, format = ?config.format, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_info_pretty() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn format_deserializes_lowercase() {
        let config: LoggingConfig = serde_json::from_str(r#"{"format": "json"}"#).unwrap();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn bad_level_is_rejected() {
        let config = LoggingConfig {
            level: "actionrouter=[".to_string(),
            ..LoggingConfig::default()
        };
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(config.env_filter().is_err());
        }
    }
}
