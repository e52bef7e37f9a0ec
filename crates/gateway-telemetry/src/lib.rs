//! # Gateway Telemetry
//!
//! Structured logging for the LLM Inference Gateway.
//!
//! The schema and evaluation crates emit `tracing` events; this crate
//! installs the subscriber that renders them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod logging;

// Re-export main types
pub use logging::{init_logging, LogFormat, LoggingConfig, TelemetryError};
