//! Route-type dispatch.
//!
//! Each route type is an independent [`RouteSchema`] implementation pairing
//! a request envelope with a response envelope. Dispatch from a route type
//! tag to the right pair is a plain match; no route type depends on another.

use crate::chat::{Chat, ChatRequest, ChatResponse};
use crate::completions::{Completions, CompletionsRequest, CompletionsResponse};
use crate::embeddings::{Embeddings, EmbeddingsRequest, EmbeddingsResponse};
use crate::envelope::Envelope;
use crate::error::GatewayResult;
use crate::response::ResponseMetadata;
use crate::types::RouteType;
use serde_json::Value;
use tracing::{debug, warn};

/// The request/response envelope pair served by one route type.
pub trait RouteSchema {
    /// Tag this schema is dispatched on.
    const ROUTE_TYPE: RouteType;

    /// Validated request shape.
    type Request: Envelope;

    /// Validated response shape.
    type Response: Envelope;

    /// Validates a raw request.
    fn validate_request(raw: Value) -> GatewayResult<Self::Request> {
        Self::Request::validate(raw)
    }

    /// Validates a raw response.
    fn validate_response(raw: Value) -> GatewayResult<Self::Response> {
        Self::Response::validate(raw)
    }
}

/// A validated request of any route type.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteRequest {
    /// `llm/v1/completions`
    Completions(CompletionsRequest),
    /// `llm/v1/chat`
    Chat(ChatRequest),
    /// `llm/v1/embeddings`
    Embeddings(EmbeddingsRequest),
}

impl RouteRequest {
    /// Route type this request was validated for.
    #[must_use]
    pub fn route_type(&self) -> RouteType {
        match self {
            Self::Completions(_) => Completions::ROUTE_TYPE,
            Self::Chat(_) => Chat::ROUTE_TYPE,
            Self::Embeddings(_) => Embeddings::ROUTE_TYPE,
        }
    }

    /// Serializes back to a raw record.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Completions(request) => request.to_value(),
            Self::Chat(request) => request.to_value(),
            Self::Embeddings(request) => request.to_value(),
        }
    }
}

/// A validated response of any route type.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteResponse {
    /// `llm/v1/completions`
    Completions(CompletionsResponse),
    /// `llm/v1/chat`
    Chat(ChatResponse),
    /// `llm/v1/embeddings`
    Embeddings(EmbeddingsResponse),
}

impl RouteResponse {
    /// Route type this response was validated for.
    #[must_use]
    pub fn route_type(&self) -> RouteType {
        match self {
            Self::Completions(_) => Completions::ROUTE_TYPE,
            Self::Chat(_) => Chat::ROUTE_TYPE,
            Self::Embeddings(_) => Embeddings::ROUTE_TYPE,
        }
    }

    /// Response-level metadata.
    #[must_use]
    pub fn metadata(&self) -> &ResponseMetadata {
        match self {
            Self::Completions(response) => &response.metadata,
            Self::Chat(response) => &response.metadata,
            Self::Embeddings(response) => &response.metadata,
        }
    }

    /// Serializes back to a raw record.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Completions(response) => response.to_value(),
            Self::Chat(response) => response.to_value(),
            Self::Embeddings(response) => response.to_value(),
        }
    }
}

impl RouteType {
    /// Validates a raw request against this route type's request envelope.
    pub fn validate_request(self, raw: Value) -> GatewayResult<RouteRequest> {
        debug!(route_type = %self, "Validating request");
        let request = match self {
            Self::Completions => RouteRequest::Completions(Completions::validate_request(raw)?),
            Self::Chat => RouteRequest::Chat(Chat::validate_request(raw)?),
            Self::Embeddings => RouteRequest::Embeddings(Embeddings::validate_request(raw)?),
        };
        Ok(request)
    }

    /// Validates a raw provider response against this route type's response
    /// envelope.
    ///
    /// A `route_type` in the metadata that disagrees with `self` is logged
    /// but not rejected.
    pub fn validate_response(self, raw: Value) -> GatewayResult<RouteResponse> {
        debug!(route_type = %self, "Validating response");
        let response = match self {
            Self::Completions => {
                RouteResponse::Completions(Completions::validate_response(raw)?)
            }
            Self::Chat => RouteResponse::Chat(Chat::validate_response(raw)?),
            Self::Embeddings => RouteResponse::Embeddings(Embeddings::validate_response(raw)?),
        };

        let reported = response.metadata().route_type;
        if reported != self {
            warn!(
                dispatched = %self,
                reported = %reported,
                "Response metadata route_type does not match dispatch route type"
            );
        }

        Ok(response)
    }
}
