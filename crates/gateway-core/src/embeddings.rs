//! `llm/v1/embeddings` request and response envelopes.

use crate::envelope::{
    impl_envelope_serde, index_path, type_mismatch, Envelope, Extras, FieldReader, Record,
    RecordWriter,
};
use crate::error::{FieldConstraint, GatewayError, GatewayResult};
use crate::response::ResponseMetadata;
use crate::route::RouteSchema;
use crate::types::RouteType;
use serde_json::Value;

/// Embeddings route marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct Embeddings;

impl RouteSchema for Embeddings {
    const ROUTE_TYPE: RouteType = RouteType::Embeddings;
    type Request = EmbeddingsRequest;
    type Response = EmbeddingsResponse;
}

/// Text to embed: one string or a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbeddingInput {
    /// A single string
    Single(String),
    /// A batch of strings
    Batch(Vec<String>),
}

impl EmbeddingInput {
    /// Number of texts to embed.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Batch(texts) => texts.len(),
        }
    }

    /// Whether the batch is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn from_field(field: String, value: Value) -> GatewayResult<Self> {
        const EXPECTED: &str = "string or array of strings";
        match value {
            Value::String(text) => Ok(Self::Single(text)),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Value::String(text) => Ok(text),
                    other => Err(type_mismatch(index_path(&field, index), "string", &other)),
                })
                .collect::<GatewayResult<Vec<_>>>()
                .map(Self::Batch),
            other => Err(type_mismatch(field, EXPECTED, &other)),
        }
    }
}

impl From<EmbeddingInput> for Value {
    fn from(input: EmbeddingInput) -> Self {
        match input {
            EmbeddingInput::Single(text) => Self::String(text),
            EmbeddingInput::Batch(texts) => texts.into(),
        }
    }
}

/// Embeddings request.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingsRequest {
    /// Text to embed
    pub text: EmbeddingInput,

    /// Provider-specific request fields
    pub extra: Extras,
}

impl EmbeddingsRequest {
    /// Creates a request for one string.
    #[must_use]
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            text: EmbeddingInput::Single(text.into()),
            extra: Extras::new(),
        }
    }

    /// Creates a request for a batch of strings.
    #[must_use]
    pub fn batch(texts: Vec<String>) -> Self {
        Self {
            text: EmbeddingInput::Batch(texts),
            extra: Extras::new(),
        }
    }
}

impl Envelope for EmbeddingsRequest {
    fn from_value_at(path: &str, value: Value) -> GatewayResult<Self> {
        let mut reader = FieldReader::new(path, value)?;
        let raw: Value = reader.required("text", "string or array of strings")?;
        let field = reader.path_of("text");
        let text = EmbeddingInput::from_field(field.clone(), raw)?;
        if text.is_empty() {
            return Err(GatewayError::validation(field, FieldConstraint::NonEmpty));
        }
        Ok(Self {
            text,
            extra: reader.finish(),
        })
    }

    fn to_record(&self) -> Record {
        RecordWriter::new(&self.extra)
            .field("text", self.text.clone())
            .finish()
    }

    fn extra(&self) -> &Extras {
        &self.extra
    }
}

/// Embeddings response.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingsResponse {
    /// One vector per input text
    pub embeddings: Vec<Vec<f64>>,

    /// Response metadata
    pub metadata: ResponseMetadata,

    /// Provider-specific response fields
    pub extra: Extras,
}

impl Envelope for EmbeddingsResponse {
    fn from_value_at(path: &str, value: Value) -> GatewayResult<Self> {
        let mut reader = FieldReader::new(path, value)?;
        Ok(Self {
            embeddings: reader.required_list("embeddings", "array of numbers")?,
            metadata: reader.required_envelope("metadata")?,
            extra: reader.finish(),
        })
    }

    fn to_record(&self) -> Record {
        RecordWriter::new(&self.extra)
            .field("embeddings", self.embeddings.clone())
            .envelope("metadata", &self.metadata)
            .finish()
    }

    fn extra(&self) -> &Extras {
        &self.extra
    }
}

impl_envelope_serde!(EmbeddingsRequest, EmbeddingsResponse);
