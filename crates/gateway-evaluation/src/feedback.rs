//! Feedback on an evaluation row and its persisted form.

use crate::record::require_id;
use chrono::Utc;
use gateway_core::{FieldConstraint, GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Who produced a piece of feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedbackSourceType {
    /// A human reviewer
    Human,
    /// An LLM acting as judge
    AiJudge,
    /// A deterministic code check
    Code,
}

/// Origin of a piece of feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSource {
    /// Kind of source
    pub source_type: FeedbackSourceType,
    /// Identifier of the reviewer, judge, or check
    pub source_id: String,
    /// Additional source details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl FeedbackSourceType {
    /// Wire name, e.g. `AI_JUDGE`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Human => "HUMAN",
            Self::AiJudge => "AI_JUDGE",
            Self::Code => "CODE",
        }
    }
}

impl FeedbackSource {
    /// Creates a source without metadata.
    #[must_use]
    pub fn new(source_type: FeedbackSourceType, source_id: impl Into<String>) -> Self {
        Self {
            source_type,
            source_id: source_id.into(),
            metadata: None,
        }
    }

    /// Field-by-field dictionary form.
    #[must_use]
    pub fn to_dictionary(&self) -> Value {
        let mut dict = Map::new();
        dict.insert("source_type".to_string(), self.source_type.as_str().into());
        dict.insert("source_id".to_string(), self.source_id.clone().into());
        if let Some(metadata) = &self.metadata {
            dict.insert("metadata".to_string(), Value::Object(metadata.clone()));
        }
        Value::Object(dict)
    }
}

/// A feedback value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedbackValue {
    /// Pass/fail style feedback
    Boolean(bool),
    /// Score style feedback
    Number(f64),
    /// Free-form or categorical feedback
    Text(String),
}

impl From<bool> for FeedbackValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for FeedbackValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FeedbackValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FeedbackValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&FeedbackValue> for Value {
    fn from(value: &FeedbackValue) -> Self {
        match value {
            FeedbackValue::Boolean(b) => Self::Bool(*b),
            FeedbackValue::Number(n) => Self::from(*n),
            FeedbackValue::Text(s) => Self::String(s.clone()),
        }
    }
}

/// Feedback on one evaluation row.
///
/// Either a value or an error code is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    name: String,
    source: FeedbackSource,
    value: Option<FeedbackValue>,
    rationale: Option<String>,
    metadata: Option<BTreeMap<String, String>>,
    error_code: Option<String>,
    error_message: Option<String>,
    timestamp: i64,
}

impl Feedback {
    /// Starts building feedback with the given name and source.
    #[must_use]
    pub fn builder(name: impl Into<String>, source: FeedbackSource) -> FeedbackBuilder {
        FeedbackBuilder {
            name: name.into(),
            source,
            value: None,
            rationale: None,
            metadata: None,
            error_code: None,
            error_message: None,
            timestamp: None,
        }
    }

    /// Feedback name, e.g. `correctness`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the feedback came from.
    #[must_use]
    pub fn source(&self) -> &FeedbackSource {
        &self.source
    }

    /// The feedback value, absent when the feedback records an error.
    #[must_use]
    pub fn value(&self) -> Option<&FeedbackValue> {
        self.value.as_ref()
    }

    /// Why the value was given.
    #[must_use]
    pub fn rationale(&self) -> Option<&str> {
        self.rationale.as_deref()
    }

    /// Additional string metadata.
    #[must_use]
    pub fn metadata(&self) -> Option<&BTreeMap<String, String>> {
        self.metadata.as_ref()
    }

    /// Error code if producing the feedback failed.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.error_code.as_deref()
    }

    /// Error message if producing the feedback failed.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Field-by-field dictionary form, with absent optionals as `null`.
    #[must_use]
    pub fn to_dictionary(&self) -> Value {
        let metadata = self.metadata.as_ref().map(|metadata| {
            metadata
                .iter()
                .map(|(key, value)| (key.clone(), Value::String(value.clone())))
                .collect::<Map<_, _>>()
        });

        let mut dict = Map::new();
        dict.insert("name".to_string(), self.name.clone().into());
        dict.insert("source".to_string(), self.source.to_dictionary());
        dict.insert("value".to_string(), self.value.as_ref().map_or(Value::Null, Value::from));
        dict.insert("rationale".to_string(), self.rationale.clone().into());
        dict.insert("metadata".to_string(), metadata.into());
        dict.insert("error_code".to_string(), self.error_code.clone().into());
        dict.insert("error_message".to_string(), self.error_message.clone().into());
        dict.insert("timestamp".to_string(), self.timestamp.into());
        Value::Object(dict)
    }

    /// Converts to the persisted form for the given evaluation.
    pub fn to_record(&self, evaluation_id: &str) -> GatewayResult<FeedbackRecord> {
        let evaluation_id = require_id("evaluation_id", evaluation_id)?;
        let (boolean_value, numeric_value, string_value) = match &self.value {
            Some(FeedbackValue::Boolean(b)) => (Some(*b), None, None),
            Some(FeedbackValue::Number(n)) => (None, Some(*n), None),
            Some(FeedbackValue::Text(s)) => (None, None, Some(s.clone())),
            None => (None, None, None),
        };

        Ok(FeedbackRecord {
            evaluation_id: evaluation_id.to_string(),
            name: self.name.clone(),
            source: self.source.clone(),
            boolean_value,
            numeric_value,
            string_value,
            rationale: self.rationale.clone(),
            metadata: self.metadata.clone(),
            error_code: self.error_code.clone(),
            error_message: self.error_message.clone(),
            timestamp: self.timestamp,
        })
    }
}

/// Builder for [`Feedback`].
#[derive(Debug)]
pub struct FeedbackBuilder {
    name: String,
    source: FeedbackSource,
    value: Option<FeedbackValue>,
    rationale: Option<String>,
    metadata: Option<BTreeMap<String, String>>,
    error_code: Option<String>,
    error_message: Option<String>,
    timestamp: Option<i64>,
}

impl FeedbackBuilder {
    /// Set the value
    #[must_use]
    pub fn value(mut self, value: impl Into<FeedbackValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the rationale
    #[must_use]
    pub fn rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }

    /// Add a metadata entry
    #[must_use]
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Record that producing the feedback failed
    #[must_use]
    pub fn error(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self.error_message = Some(message.into());
        self
    }

    /// Set an explicit timestamp (milliseconds since the Unix epoch)
    #[must_use]
    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Build the feedback
    ///
    /// # Errors
    /// Returns error if the name is empty or neither a value nor an error
    /// code was given
    pub fn build(self) -> GatewayResult<Feedback> {
        if self.name.trim().is_empty() {
            return Err(GatewayError::validation("name", FieldConstraint::NonEmpty));
        }
        if self.value.is_none() && self.error_code.is_none() {
            return Err(GatewayError::missing("value"));
        }

        Ok(Feedback {
            name: self.name,
            source: self.source,
            value: self.value,
            rationale: self.rationale,
            metadata: self.metadata,
            error_code: self.error_code,
            error_message: self.error_message,
            timestamp: self
                .timestamp
                .unwrap_or_else(|| Utc::now().timestamp_millis()),
        })
    }
}

/// Persisted feedback, owned by the storage layer once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Evaluation this feedback belongs to
    pub evaluation_id: String,
    /// Feedback name
    pub name: String,
    /// Feedback source
    pub source: FeedbackSource,
    /// Value when boolean
    pub boolean_value: Option<bool>,
    /// Value when numeric
    pub numeric_value: Option<f64>,
    /// Value when textual
    pub string_value: Option<String>,
    /// Why the value was given
    pub rationale: Option<String>,
    /// Additional string metadata
    pub metadata: Option<BTreeMap<String, String>>,
    /// Error code if producing the feedback failed
    pub error_code: Option<String>,
    /// Error message if producing the feedback failed
    pub error_message: Option<String>,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}
