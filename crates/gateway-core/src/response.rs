//! Canonical response metadata shared across route types.
//!
//! Provider adapters fill these in at the gateway boundary so that clients
//! see the same token accounting, model identity, and finish reason no matter
//! which backend served the request.

use crate::envelope::{
    impl_envelope_serde, Envelope, Extras, FieldEnum, FieldReader, Record, RecordWriter,
};
use crate::error::{FieldConstraint, GatewayError, GatewayResult};
use crate::types::RouteType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Why a provider stopped generating a candidate.
///
/// An absent finish reason means the provider did not report one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop or stop sequence hit
    Stop,
    /// Token limit reached
    Length,
    /// Output withheld by a content filter
    ContentFilter,
}

impl FieldEnum for FinishReason {
    const VARIANTS: &'static [Self] = &[Self::Stop, Self::Length, Self::ContentFilter];

    fn as_str(self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Length => "length",
            Self::ContentFilter => "content_filter",
        }
    }
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-candidate metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateMetadata {
    /// Reason generation stopped, if reported
    pub finish_reason: Option<FinishReason>,

    /// Provider-specific candidate metadata
    pub extra: Extras,
}

impl CandidateMetadata {
    /// Metadata with the given finish reason.
    #[must_use]
    pub fn finished(reason: FinishReason) -> Self {
        Self {
            finish_reason: Some(reason),
            extra: Extras::new(),
        }
    }
}

impl Envelope for CandidateMetadata {
    fn from_value_at(path: &str, value: Value) -> GatewayResult<Self> {
        let mut reader = FieldReader::new(path, value)?;
        Ok(Self {
            finish_reason: reader.optional_enum("finish_reason")?,
            extra: reader.finish(),
        })
    }

    fn to_record(&self) -> Record {
        RecordWriter::new(&self.extra)
            .optional("finish_reason", self.finish_reason.map(FinishReason::as_str))
            .finish()
    }

    fn extra(&self) -> &Extras {
        &self.extra
    }
}

/// Response-level metadata: token usage, model identity, and route type.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseMetadata {
    /// Prompt tokens consumed
    pub input_tokens: Option<u64>,

    /// Tokens generated
    pub output_tokens: Option<u64>,

    /// Total tokens billed
    pub total_tokens: Option<u64>,

    /// Model that produced the response
    pub model: String,

    /// Route type the response was produced for
    pub route_type: RouteType,

    /// Provider-specific response metadata
    pub extra: Extras,
}

impl ResponseMetadata {
    /// Metadata without token usage.
    #[must_use]
    pub fn new(model: impl Into<String>, route_type: RouteType) -> Self {
        Self {
            input_tokens: None,
            output_tokens: None,
            total_tokens: None,
            model: model.into(),
            route_type,
            extra: Extras::new(),
        }
    }

    /// Sets input and output token counts and derives the total.
    #[must_use]
    pub fn with_usage(mut self, input_tokens: u64, output_tokens: u64) -> Self {
        self.input_tokens = Some(input_tokens);
        self.output_tokens = Some(output_tokens);
        self.total_tokens = input_tokens.checked_add(output_tokens);
        self
    }

    /// Whether the three token counts agree. `None` unless all are reported.
    #[must_use]
    pub fn usage_is_consistent(&self) -> Option<bool> {
        match (self.input_tokens, self.output_tokens, self.total_tokens) {
            (Some(input), Some(output), Some(total)) => {
                Some(input.checked_add(output) == Some(total))
            }
            _ => None,
        }
    }
}

impl Envelope for ResponseMetadata {
    fn from_value_at(path: &str, value: Value) -> GatewayResult<Self> {
        let mut reader = FieldReader::new(path, value)?;
        let input_tokens = reader.optional("input_tokens", "non-negative integer")?;
        let output_tokens = reader.optional("output_tokens", "non-negative integer")?;
        let total_tokens = reader.optional("total_tokens", "non-negative integer")?;

        let model: String = reader.required("model", "string")?;
        if model.trim().is_empty() {
            return Err(GatewayError::validation(
                reader.path_of("model"),
                FieldConstraint::NonEmpty,
            ));
        }

        Ok(Self {
            input_tokens,
            output_tokens,
            total_tokens,
            model,
            route_type: reader.required_enum("route_type")?,
            extra: reader.finish(),
        })
    }

    fn to_record(&self) -> Record {
        RecordWriter::new(&self.extra)
            .optional("input_tokens", self.input_tokens)
            .optional("output_tokens", self.output_tokens)
            .optional("total_tokens", self.total_tokens)
            .field("model", self.model.as_str())
            .field("route_type", self.route_type.as_str())
            .finish()
    }

    fn extra(&self) -> &Extras {
        &self.extra
    }
}

impl_envelope_serde!(CandidateMetadata, ResponseMetadata);
