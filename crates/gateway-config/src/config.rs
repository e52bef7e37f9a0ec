//! Gateway route configuration.

use crate::error::{ConfigError, ConfigResult};
use gateway_core::RouteType;
use gateway_telemetry::LoggingConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};
use validator::Validate;

/// Configuration document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML document.
    Yaml,
    /// TOML document.
    Toml,
}

impl ConfigFormat {
    /// Detect the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        }
    }
}

/// Upstream model a route forwards to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ModelConfig {
    /// Provider name, e.g. `openai`.
    #[validate(length(min = 1, message = "provider must not be empty"))]
    pub provider: String,

    /// Model name at the provider.
    #[validate(length(min = 1, message = "model name must not be empty"))]
    pub name: String,

    /// Provider specific settings, passed through untouched.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub config: Map<String, Value>,
}

/// A named route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RouteConfig {
    /// Route name, unique within the configuration.
    #[validate(length(min = 1, message = "route name must not be empty"))]
    pub name: String,

    /// Request/response family served by the route.
    pub route_type: RouteType,

    /// Upstream model.
    #[validate(nested)]
    pub model: ModelConfig,
}

impl RouteConfig {
    /// Create a route with an empty provider config.
    pub fn new(
        name: impl Into<String>,
        route_type: RouteType,
        provider: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            route_type,
            model: ModelConfig {
                provider: provider.into(),
                name: model.into(),
                config: Map::new(),
            },
        }
    }
}

/// Top level gateway configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct GatewayConfig {
    /// Configured routes.
    #[serde(default)]
    #[validate(nested)]
    pub routes: Vec<RouteConfig>,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GatewayConfig {
    /// Parse and validate a YAML document.
    ///
    /// # Errors
    /// Returns error if the document does not parse or fails validation.
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::parse(ConfigFormat::Yaml.name(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML document.
    ///
    /// # Errors
    /// Returns error if the document does not parse or fails validation.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::parse(ConfigFormat::Toml.name(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, choosing the format by extension.
    ///
    /// # Errors
    /// Returns error if the extension is unsupported, the file cannot be
    /// read, or its content is invalid.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.display().to_string(),
        })?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), format = format.name(), "Loading configuration");

        let config = match format {
            ConfigFormat::Yaml => Self::from_yaml_str(&content)?,
            ConfigFormat::Toml => Self::from_toml_str(&content)?,
        };
        info!(path = %path.display(), routes = config.routes.len(), "Configuration loaded");
        Ok(config)
    }

    /// Validate field constraints and route name uniqueness.
    ///
    /// # Errors
    /// Returns the first violation found.
    pub fn validate(&self) -> ConfigResult<()> {
        Validate::validate(self)?;

        let mut seen = HashSet::new();
        for route in &self.routes {
            if !seen.insert(route.name.as_str()) {
                return Err(ConfigError::DuplicateRoute {
                    name: route.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Look up a route by name.
    #[must_use]
    pub fn route(&self, name: &str) -> Option<&RouteConfig> {
        self.routes.iter().find(|route| route.name == name)
    }
}
