//! Evaluation units: one row of model inputs, outputs, and judgements.

use crate::feedback::Feedback;
use crate::identity::generate_inputs_id;
use crate::metric::Metric;
use crate::record::{require_id, EvaluationRecord};
use gateway_core::GatewayResult;
use serde_json::{Map, Value};
use tracing::debug;

/// An immutable evaluation row.
///
/// Two evaluations are equal iff their dictionary forms are equal: mappings
/// compare regardless of key order, while `feedback` and `metrics` compare
/// in order. Non-finite metric values render as `null`, so a NaN metric
/// equals itself.
#[derive(Debug, Clone)]
pub struct Evaluation {
    inputs_id: String,
    inputs: Map<String, Value>,
    outputs: Map<String, Value>,
    request_id: Option<String>,
    ground_truths: Option<Map<String, Value>>,
    feedback: Option<Vec<Feedback>>,
    metrics: Option<Vec<Metric>>,
}

impl Evaluation {
    /// Starts building an evaluation from the model's inputs and outputs.
    #[must_use]
    pub fn builder(inputs: Map<String, Value>, outputs: Map<String, Value>) -> EvaluationBuilder {
        EvaluationBuilder {
            inputs,
            outputs,
            inputs_id: None,
            request_id: None,
            ground_truths: None,
            feedback: None,
            metrics: None,
        }
    }

    /// Builds an evaluation with only inputs and outputs.
    pub fn new(inputs: Map<String, Value>, outputs: Map<String, Value>) -> GatewayResult<Self> {
        Self::builder(inputs, outputs).build()
    }

    /// Content identity of the inputs.
    #[must_use]
    pub fn inputs_id(&self) -> &str {
        &self.inputs_id
    }

    /// Inputs passed to the model.
    #[must_use]
    pub fn inputs(&self) -> &Map<String, Value> {
        &self.inputs
    }

    /// Outputs produced by the model.
    #[must_use]
    pub fn outputs(&self) -> &Map<String, Value> {
        &self.outputs
    }

    /// Correlated trace/request id.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Expected outputs.
    #[must_use]
    pub fn ground_truths(&self) -> Option<&Map<String, Value>> {
        self.ground_truths.as_ref()
    }

    /// Feedback on this row.
    #[must_use]
    pub fn feedback(&self) -> Option<&[Feedback]> {
        self.feedback.as_deref()
    }

    /// Metric observations for this row.
    #[must_use]
    pub fn metrics(&self) -> Option<&[Metric]> {
        self.metrics.as_deref()
    }

    /// Field-by-field dictionary form.
    #[must_use]
    pub fn to_dictionary(&self) -> Value {
        let mut dict = Map::new();
        dict.insert("inputs_id".to_string(), self.inputs_id.clone().into());
        dict.insert("inputs".to_string(), Value::Object(self.inputs.clone()));
        dict.insert("outputs".to_string(), Value::Object(self.outputs.clone()));
        dict.insert("request_id".to_string(), self.request_id.clone().into());
        dict.insert("ground_truths".to_string(), self.ground_truths.clone().into());
        dict.insert(
            "feedback".to_string(),
            self.feedback
                .as_ref()
                .map_or(Value::Null, |items| items.iter().map(Feedback::to_dictionary).collect()),
        );
        dict.insert(
            "metrics".to_string(),
            self.metrics
                .as_ref()
                .map_or(Value::Null, |items| items.iter().map(Metric::to_dictionary).collect()),
        );
        Value::Object(dict)
    }

    /// Converts to the persisted form.
    ///
    /// Both identifiers are assigned by the caller; an empty one is an
    /// [`AssemblyPrecondition`](gateway_core::GatewayError::AssemblyPrecondition)
    /// error. Each feedback item is converted with the same `evaluation_id`.
    pub fn to_record(&self, run_id: &str, evaluation_id: &str) -> GatewayResult<EvaluationRecord> {
        let run_id = require_id("run_id", run_id)?;
        let evaluation_id = require_id("evaluation_id", evaluation_id)?;

        let feedback = match self.feedback.as_deref() {
            Some(items) if !items.is_empty() => Some(
                items
                    .iter()
                    .map(|item| item.to_record(evaluation_id))
                    .collect::<GatewayResult<Vec<_>>>()?,
            ),
            _ => None,
        };

        debug!(
            run_id = %run_id,
            evaluation_id = %evaluation_id,
            inputs_id = %self.inputs_id,
            feedback_count = feedback.as_ref().map_or(0, Vec::len),
            "Assembled evaluation record"
        );

        Ok(EvaluationRecord {
            evaluation_id: evaluation_id.to_string(),
            run_id: run_id.to_string(),
            inputs_id: self.inputs_id.clone(),
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
            request_id: self.request_id.clone(),
            ground_truths: self.ground_truths.clone(),
            feedback,
            metrics: self.metrics.clone(),
        })
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.to_dictionary() == other.to_dictionary()
    }
}

/// Builder for [`Evaluation`].
#[derive(Debug)]
pub struct EvaluationBuilder {
    inputs: Map<String, Value>,
    outputs: Map<String, Value>,
    inputs_id: Option<String>,
    request_id: Option<String>,
    ground_truths: Option<Map<String, Value>>,
    feedback: Option<Vec<Feedback>>,
    metrics: Option<Vec<Metric>>,
}

impl EvaluationBuilder {
    /// Use a caller-supplied inputs id instead of deriving one
    #[must_use]
    pub fn inputs_id(mut self, inputs_id: impl Into<String>) -> Self {
        self.inputs_id = Some(inputs_id.into());
        self
    }

    /// Set the correlated request id
    #[must_use]
    pub fn request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Set the expected outputs
    #[must_use]
    pub fn ground_truths(mut self, ground_truths: Map<String, Value>) -> Self {
        self.ground_truths = Some(ground_truths);
        self
    }

    /// Set the feedback
    #[must_use]
    pub fn feedback(mut self, feedback: Vec<Feedback>) -> Self {
        self.feedback = Some(feedback);
        self
    }

    /// Set the metrics
    #[must_use]
    pub fn metrics(mut self, metrics: Vec<Metric>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the evaluation, deriving the inputs id from the inputs when
    /// none was supplied.
    pub fn build(self) -> GatewayResult<Evaluation> {
        let inputs_id = match self.inputs_id.filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => generate_inputs_id(&self.inputs)?,
        };

        Ok(Evaluation {
            inputs_id,
            inputs: self.inputs,
            outputs: self.outputs,
            request_id: self.request_id,
            ground_truths: self.ground_truths,
            feedback: self.feedback,
            metrics: self.metrics,
        })
    }
}
