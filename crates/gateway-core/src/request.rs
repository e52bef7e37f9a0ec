//! Canonical request fields shared across route types.

use crate::envelope::{
    impl_envelope_serde, type_mismatch, Envelope, Extras, FieldReader, Record, RecordWriter,
};
use crate::error::{FieldConstraint, GatewayError, GatewayResult};
use serde_json::{Number, Value};

/// Upper bound for `temperature`.
pub const MAX_TEMPERATURE: f64 = 2.0;

/// Upper bound for `candidate_count`.
pub const MAX_CANDIDATE_COUNT: u32 = 5;

/// Sampling parameters accepted by completions and chat routes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationParams {
    /// Sampling temperature (0.0 - 2.0)
    pub temperature: Option<f64>,

    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,

    /// Stop sequences
    pub stop: Option<Vec<String>>,

    /// Number of candidates to generate (1 - 5)
    pub candidate_count: Option<u32>,
}

impl GenerationParams {
    /// Reads and range-checks the parameters from a request record.
    pub fn read(reader: &mut FieldReader<'_>) -> GatewayResult<Self> {
        let temperature: Option<f64> = reader.optional("temperature", "number")?;
        if let Some(t) = temperature {
            if !(0.0..=MAX_TEMPERATURE).contains(&t) {
                return Err(out_of_range(
                    reader.path_of("temperature"),
                    format!("between 0.0 and {MAX_TEMPERATURE:.1}"),
                ));
            }
        }

        let max_tokens = read_bounded(reader, "max_tokens", 1, u32::MAX)?;

        let stop: Option<Vec<String>> = reader.optional_list("stop", "string")?;
        if stop.as_ref().is_some_and(Vec::is_empty) {
            return Err(GatewayError::validation(
                reader.path_of("stop"),
                FieldConstraint::NonEmpty,
            ));
        }

        let candidate_count = read_bounded(reader, "candidate_count", 1, MAX_CANDIDATE_COUNT)?;

        Ok(Self {
            temperature,
            max_tokens,
            stop,
            candidate_count,
        })
    }

    /// Writes the parameters that are set.
    #[must_use]
    pub fn write(&self, writer: RecordWriter) -> RecordWriter {
        writer
            .optional("temperature", self.temperature)
            .optional("max_tokens", self.max_tokens)
            .optional("stop", self.stop.clone())
            .optional("candidate_count", self.candidate_count)
    }
}

fn out_of_range(field: String, bound: String) -> GatewayError {
    GatewayError::validation(field, FieldConstraint::Range { bound })
}

/// Reads an optional integer and checks it against an inclusive range.
fn read_bounded(
    reader: &mut FieldReader<'_>,
    name: &str,
    min: u32,
    max: u32,
) -> GatewayResult<Option<u32>> {
    let Some(raw) = reader.optional::<Number>(name, "integer")? else {
        return Ok(None);
    };
    if raw.is_f64() {
        return Err(type_mismatch(reader.path_of(name), "integer", &Value::Number(raw)));
    }
    let bound = if max == u32::MAX {
        format!("at least {min}")
    } else {
        format!("between {min} and {max}")
    };
    // Negative and oversized integers are range errors, not type errors.
    raw.as_u64()
        .and_then(|value| u32::try_from(value).ok())
        .filter(|value| (min..=max).contains(value))
        .map(Some)
        .ok_or_else(|| out_of_range(reader.path_of(name), bound))
}

/// A chat message sent by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestMessage {
    /// Role of the message author (e.g. `user`, `system`)
    pub role: String,

    /// Text content of the message
    pub content: String,

    /// Provider-specific message fields
    pub extra: Extras,
}

impl RequestMessage {
    /// Creates a message with the given role.
    #[must_use]
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            extra: Extras::new(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    /// Create an assistant message
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

impl Envelope for RequestMessage {
    fn from_value_at(path: &str, value: Value) -> GatewayResult<Self> {
        let mut reader = FieldReader::new(path, value)?;
        Ok(Self {
            role: reader.required("role", "string")?,
            content: reader.required("content", "string")?,
            extra: reader.finish(),
        })
    }

    fn to_record(&self) -> Record {
        RecordWriter::new(&self.extra)
            .field("role", self.role.as_str())
            .field("content", self.content.as_str())
            .finish()
    }

    fn extra(&self) -> &Extras {
        &self.extra
    }
}

impl_envelope_serde!(RequestMessage);
