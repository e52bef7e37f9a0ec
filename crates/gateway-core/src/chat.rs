//! `llm/v1/chat` request and response envelopes.

use crate::envelope::{impl_envelope_serde, Envelope, Extras, FieldReader, Record, RecordWriter};
use crate::error::{FieldConstraint, GatewayError, GatewayResult};
use crate::request::{GenerationParams, RequestMessage};
use crate::response::{CandidateMetadata, ResponseMetadata};
use crate::route::RouteSchema;
use crate::types::RouteType;
use serde_json::Value;

/// Chat route marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chat;

impl RouteSchema for Chat {
    const ROUTE_TYPE: RouteType = RouteType::Chat;
    type Request = ChatRequest;
    type Response = ChatResponse;
}

/// Chat completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Conversation so far
    pub messages: Vec<RequestMessage>,

    /// Sampling parameters
    pub params: GenerationParams,

    /// Provider-specific request fields
    pub extra: Extras,
}

impl ChatRequest {
    /// Creates a request from a conversation.
    #[must_use]
    pub fn new(messages: Vec<RequestMessage>) -> Self {
        Self {
            messages,
            params: GenerationParams::default(),
            extra: Extras::new(),
        }
    }

    /// Add a message
    #[must_use]
    pub fn message(mut self, message: RequestMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Set the sampling parameters
    #[must_use]
    pub fn params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }
}

impl Envelope for ChatRequest {
    fn from_value_at(path: &str, value: Value) -> GatewayResult<Self> {
        let mut reader = FieldReader::new(path, value)?;
        let messages: Vec<RequestMessage> = reader.required_envelopes("messages")?;
        if messages.is_empty() {
            return Err(GatewayError::validation(
                reader.path_of("messages"),
                FieldConstraint::NonEmpty,
            ));
        }
        let params = GenerationParams::read(&mut reader)?;
        Ok(Self {
            messages,
            params,
            extra: reader.finish(),
        })
    }

    fn to_record(&self) -> Record {
        let writer = RecordWriter::new(&self.extra).envelopes("messages", &self.messages);
        self.params.write(writer).finish()
    }

    fn extra(&self) -> &Extras {
        &self.extra
    }
}

/// A message produced by the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseMessage {
    /// Role of the author, normally `assistant`
    pub role: String,

    /// Generated content
    pub content: String,

    /// Provider-specific message fields
    pub extra: Extras,
}

impl ResponseMessage {
    /// Creates an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
            extra: Extras::new(),
        }
    }
}

impl Envelope for ResponseMessage {
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

/// One generated chat reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatCandidate {
    /// The reply
    pub message: ResponseMessage,

    /// Candidate metadata
    pub metadata: CandidateMetadata,

    /// Provider-specific candidate fields
    pub extra: Extras,
}

impl ChatCandidate {
    /// Creates a candidate.
    #[must_use]
    pub fn new(message: ResponseMessage, metadata: CandidateMetadata) -> Self {
        Self {
            message,
            metadata,
            extra: Extras::new(),
        }
    }
}

impl Envelope for ChatCandidate {
    fn from_value_at(path: &str, value: Value) -> GatewayResult<Self> {
        let mut reader = FieldReader::new(path, value)?;
        Ok(Self {
            message: reader.required_envelope("message")?,
            metadata: reader.required_envelope("metadata")?,
            extra: reader.finish(),
        })
    }

    fn to_record(&self) -> Record {
        RecordWriter::new(&self.extra)
            .envelope("message", &self.message)
            .envelope("metadata", &self.metadata)
            .finish()
    }

    fn extra(&self) -> &Extras {
        &self.extra
    }
}

/// Chat completion response.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatResponse {
    /// Generated candidates
    pub candidates: Vec<ChatCandidate>,

    /// Response metadata
    pub metadata: ResponseMetadata,

    /// Provider-specific response fields
    pub extra: Extras,
}

impl Envelope for ChatResponse {
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

impl_envelope_serde!(ChatRequest, ResponseMessage, ChatCandidate, ChatResponse);
