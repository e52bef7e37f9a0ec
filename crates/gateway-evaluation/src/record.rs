//! Persisted evaluation records handed to the storage layer.

use crate::feedback::FeedbackRecord;
use crate::metric::Metric;
use gateway_core::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Persisted form of an evaluation, keyed by `(run_id, evaluation_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// Evaluation identifier assigned by the caller
    pub evaluation_id: String,
    /// Run the evaluation was logged to
    pub run_id: String,
    /// Content identity of the inputs
    pub inputs_id: String,
    /// Inputs passed to the model
    pub inputs: Map<String, Value>,
    /// Outputs produced by the model
    pub outputs: Map<String, Value>,
    /// Correlated trace/request id
    pub request_id: Option<String>,
    /// Expected outputs
    pub ground_truths: Option<Map<String, Value>>,
    /// Converted feedback, `None` when there was none
    pub feedback: Option<Vec<FeedbackRecord>>,
    /// Metric observations
    pub metrics: Option<Vec<Metric>>,
}

/// Checks that an externally assigned identifier was supplied.
pub(crate) fn require_id<'a>(field: &str, id: &'a str) -> GatewayResult<&'a str> {
    if id.trim().is_empty() {
        Err(GatewayError::assembly_precondition(field))
    } else {
        Ok(id)
    }
}
