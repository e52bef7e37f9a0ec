//! Integration tests for the LLM Inference Gateway
//!
//! This crate exercises the schema layer end to end:
//! - Envelope validation and extras preservation per route type
//! - Route configuration loading and dispatch
//! - Evaluation identity and record assembly

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items
pub use fixtures::*;
pub use helpers::*;

#[cfg(test)]
mod evaluation_tests;
#[cfg(test)]
mod routing_tests;
#[cfg(test)]
mod schema_tests;
