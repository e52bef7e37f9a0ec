//! Structured logging setup.
//!
//! Installs a `tracing-subscriber` registry with an env-overridable level
//! filter and one of three output formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;
use tracing_subscriber::{fmt as fmt_layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, human friendly
    Pretty,
    /// Single-line text
    #[default]
    Compact,
    /// One JSON object per line
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Compact => write!(f, "compact"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level filter; `RUST_LOG` takes precedence when set
    #[serde(default = "default_level")]
    pub level: String,
    /// Output format
    #[serde(default)]
    pub format: LogFormat,
    /// Include the event target (module path)
    #[serde(default = "default_true")]
    pub with_target: bool,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            with_target: true,
        }
    }
}

impl LoggingConfig {
    /// Set the level filter
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Set the output format
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

/// Initialize logging with the given configuration
///
/// # Errors
/// Returns error if the level filter is invalid or a global subscriber is
/// already installed
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| TelemetryError::Filter(e.to_string()))?,
    };

    let registry = tracing_subscriber::registry();
    let result = match config.format {
        LogFormat::Json => registry
            .with(
                fmt_layer::layer()
                    .json()
                    .with_target(config.with_target)
                    .with_filter(filter),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt_layer::layer()
                    .pretty()
                    .with_target(config.with_target)
                    .with_filter(filter),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt_layer::layer()
                    .compact()
                    .with_target(config.with_target)
                    .with_filter(filter),
            )
            .try_init(),
    };
    result.map_err(|e| TelemetryError::Init(e.to_string()))?;

    info!(level = %config.level, format = %config.format, "Logging initialized");
    Ok(())
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to install the subscriber
    #[error("Failed to initialize logging: {0}")]
    Init(String),
    /// The level filter could not be parsed
    #[error("Invalid log filter: {0}")]
    Filter(String),
}
