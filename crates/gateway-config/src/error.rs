//! Configuration error types.

use gateway_core::GatewayError;

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Configuration error type.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid for its format.
    #[error("Failed to parse {format} config: {message}")]
    Parse {
        /// Format that was being parsed.
        format: &'static str,
        /// Parser message.
        message: String,
    },

    /// The file extension does not name a supported format.
    #[error("Unsupported config format for {path}; expected .yaml, .yml or .toml")]
    UnsupportedFormat {
        /// Offending path.
        path: String,
    },

    /// A field failed validation.
    #[error("Invalid configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Two routes share a name.
    #[error("Duplicate route name: {name}")]
    DuplicateRoute {
        /// Repeated name.
        name: String,
    },

    /// No route is configured under the name.
    #[error("Route not found: {name}")]
    RouteNotFound {
        /// Requested name.
        name: String,
    },

    /// A payload addressed to a route failed schema validation.
    #[error(transparent)]
    Schema(#[from] GatewayError),
}

impl ConfigError {
    /// Create a parse error.
    pub fn parse(format: &'static str, message: impl std::fmt::Display) -> Self {
        Self::Parse {
            format,
            message: message.to_string(),
        }
    }

    /// Create a route not found error.
    pub fn route_not_found(name: impl Into<String>) -> Self {
        Self::RouteNotFound { name: name.into() }
    }
}
