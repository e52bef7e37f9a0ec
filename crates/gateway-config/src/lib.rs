//! # Gateway Config
//!
//! Route configuration for the LLM Inference Gateway.
//!
//! A configuration file declares named routes, each bound to one route type
//! and one upstream model. The loaded configuration becomes a [`RouteTable`]
//! that validates raw payloads against the envelope pair of the route they
//! were addressed to.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod table;

pub use config::{ConfigFormat, GatewayConfig, ModelConfig, RouteConfig};
pub use error::{ConfigError, ConfigResult};
pub use table::RouteTable;
