//! Route lookup and payload dispatch.

use crate::config::{GatewayConfig, RouteConfig};
use crate::error::{ConfigError, ConfigResult};
use gateway_core::{RouteRequest, RouteResponse, RouteType};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Validated routes indexed by name.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: BTreeMap<String, RouteConfig>,
}

impl RouteTable {
    /// Build a table from a configuration.
    ///
    /// # Errors
    /// Returns error if the configuration fails validation.
    pub fn from_config(config: &GatewayConfig) -> ConfigResult<Self> {
        config.validate()?;

        let routes: BTreeMap<_, _> = config
            .routes
            .iter()
            .map(|route| (route.name.clone(), route.clone()))
            .collect();
        info!(routes = routes.len(), "Route table built");
        Ok(Self { routes })
    }

    /// Number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table has no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Route names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Resolve a route by name.
    ///
    /// # Errors
    /// Returns [`ConfigError::RouteNotFound`] for an unknown name.
    pub fn resolve(&self, name: &str) -> ConfigResult<&RouteConfig> {
        self.routes
            .get(name)
            .ok_or_else(|| ConfigError::route_not_found(name))
    }

    /// Route type served by a route.
    ///
    /// # Errors
    /// Returns [`ConfigError::RouteNotFound`] for an unknown name.
    pub fn route_type(&self, name: &str) -> ConfigResult<RouteType> {
        self.resolve(name).map(|route| route.route_type)
    }

    /// Validate a raw request addressed to a route.
    ///
    /// # Errors
    /// Returns error if the route is unknown or the payload is invalid for
    /// the route's type.
    pub fn validate_request(&self, name: &str, raw: Value) -> ConfigResult<RouteRequest> {
        let route = self.resolve(name)?;
        debug!(
            route = %route.name,
            route_type = %route.route_type,
            provider = %route.model.provider,
            "Dispatching request"
        );
        Ok(route.route_type.validate_request(raw)?)
    }

    /// Validate a raw provider response returned by a route.
    ///
    /// # Errors
    /// Returns error if the route is unknown or the payload is invalid for
    /// the route's type.
    pub fn validate_response(&self, name: &str, raw: Value) -> ConfigResult<RouteResponse> {
        let route = self.resolve(name)?;
        debug!(
            route = %route.name,
            route_type = %route.route_type,
            model = %route.model.name,
            "Dispatching response"
        );
        Ok(route.route_type.validate_response(raw)?)
    }
}
