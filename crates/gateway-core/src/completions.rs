//! `llm/v1/completions` request and response envelopes.

use crate::envelope::{impl_envelope_serde, Envelope, Extras, FieldReader, Record, RecordWriter};
use crate::error::GatewayResult;
use crate::request::GenerationParams;
use crate::response::{CandidateMetadata, ResponseMetadata};
use crate::route::RouteSchema;
use crate::types::RouteType;
use serde_json::Value;

/// Completions route marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct Completions;

impl RouteSchema for Completions {
    const ROUTE_TYPE: RouteType = RouteType::Completions;
    type Request = CompletionsRequest;
    type Response = CompletionsResponse;
}

/// Text completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionsRequest {
    /// Prompt text
    pub prompt: String,

    /// Sampling parameters
    pub params: GenerationParams,

    /// Provider-specific request fields
    pub extra: Extras,
}

impl CompletionsRequest {
    /// Creates a request with default parameters.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            params: GenerationParams::default(),
            extra: Extras::new(),
        }
    }

    /// Set the temperature
    #[must_use]
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.params.temperature = Some(temperature);
        self
    }

    /// Set max_tokens
    #[must_use]
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.params.max_tokens = Some(max_tokens);
        self
    }

    /// Set stop sequences
    #[must_use]
    pub fn stop(mut self, stop: Vec<String>) -> Self {
        self.params.stop = Some(stop);
        self
    }

    /// Add a provider-specific field
    #[must_use]
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

impl Envelope for CompletionsRequest {
    fn from_value_at(path: &str, value: Value) -> GatewayResult<Self> {
        let mut reader = FieldReader::new(path, value)?;
        let prompt = reader.required("prompt", "string")?;
        let params = GenerationParams::read(&mut reader)?;
        Ok(Self {
            prompt,
            params,
            extra: reader.finish(),
        })
    }

    fn to_record(&self) -> Record {
        let writer = RecordWriter::new(&self.extra).field("prompt", self.prompt.as_str());
        self.params.write(writer).finish()
    }

    fn extra(&self) -> &Extras {
        &self.extra
    }
}

/// One generated completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionCandidate {
    /// Generated text
    pub text: String,

    /// Candidate metadata
    pub metadata: CandidateMetadata,

    /// Provider-specific candidate fields
    pub extra: Extras,
}

impl CompletionCandidate {
    /// Creates a candidate.
    #[must_use]
    pub fn new(text: impl Into<String>, metadata: CandidateMetadata) -> Self {
        Self {
            text: text.into(),
            metadata,
            extra: Extras::new(),
        }
    }
}

impl Envelope for CompletionCandidate {
    fn from_value_at(path: &str, value: Value) -> GatewayResult<Self> {
        let mut reader = FieldReader::new(path, value)?;
        Ok(Self {
            text: reader.required("text", "string")?,
            metadata: reader.required_envelope("metadata")?,
            extra: reader.finish(),
        })
    }

    fn to_record(&self) -> Record {
        RecordWriter::new(&self.extra)
            .field("text", self.text.as_str())
            .envelope("metadata", &self.metadata)
            .finish()
    }

    fn extra(&self) -> &Extras {
        &self.extra
    }
}

/// Text completion response.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionsResponse {
    /// Generated candidates
    pub candidates: Vec<CompletionCandidate>,

    /// Response metadata
    pub metadata: ResponseMetadata,

    /// Provider-specific response fields
    pub extra: Extras,
}

impl Envelope for CompletionsResponse {
    fn from_value_at(path: &str, value: Value) -> GatewayResult<Self> {
        let mut reader = FieldReader::new(path, value)?;
        Ok(Self {
            candidates: reader.required_envelopes("candidates")?,
            metadata: reader.required_envelope("metadata")?,
            extra: reader.finish(),
        })
    }

    fn to_record(&self) -> Record {
        RecordWriter::new(&self.extra)
            .envelopes("candidates", &self.candidates)
            .envelope("metadata", &self.metadata)
            .finish()
    }

    fn extra(&self) -> &Extras {
        &self.extra
    }
}

impl_envelope_serde!(CompletionsRequest, CompletionCandidate, CompletionsResponse);
