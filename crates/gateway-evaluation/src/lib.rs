//! # Gateway Evaluation
//!
//! Evaluation logging support for the LLM Inference Gateway.
//!
//! This crate provides:
//! - Deterministic, key-order independent content identity for inputs
//! - Immutable evaluation units with structural equality
//! - Conversion of evaluations and their feedback into persisted records
//!
//! Run and evaluation identifiers are always supplied by the caller; nothing
//! here generates them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod evaluation;
pub mod feedback;
pub mod identity;
pub mod metric;
pub mod record;

// Re-export commonly used types
pub use evaluation::{Evaluation, EvaluationBuilder};
pub use feedback::{
    Feedback, FeedbackBuilder, FeedbackRecord, FeedbackSource, FeedbackSourceType, FeedbackValue,
};
pub use identity::{canonical_json, generate_inputs_id};
pub use metric::Metric;
pub use record::EvaluationRecord;
