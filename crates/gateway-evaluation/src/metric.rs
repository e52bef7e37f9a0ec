//! Numeric metric observations attached to an evaluation.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One objective measurement for an evaluation row, e.g. output token count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Metric name
    pub key: String,
    /// Observed value
    pub value: f64,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Step index for metrics logged repeatedly
    #[serde(default)]
    pub step: i64,
}

impl Metric {
    /// Creates a metric timestamped now, at step 0.
    #[must_use]
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value,
            timestamp: Utc::now().timestamp_millis(),
            step: 0,
        }
    }

    /// Set the step
    #[must_use]
    pub fn with_step(mut self, step: i64) -> Self {
        self.step = step;
        self
    }

    /// Set an explicit timestamp (milliseconds since the Unix epoch)
    #[must_use]
    pub fn at(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Field-by-field dictionary form. A NaN or infinite value renders as
    /// `null`.
    #[must_use]
    pub fn to_dictionary(&self) -> Value {
        let mut dict = Map::new();
        dict.insert("key".to_string(), self.key.clone().into());
        dict.insert("value".to_string(), self.value.into());
        dict.insert("timestamp".to_string(), self.timestamp.into());
        dict.insert("step".to_string(), self.step.into());
        Value::Object(dict)
    }
}
