//! # Gateway Core
//!
//! Canonical request/response schemas for the LLM Inference Gateway.
//!
//! This crate provides:
//! - The canonical field model shared by every route type
//! - Extensible envelopes that validate canonical fields and carry
//!   provider-specific extras through untouched
//! - Route-type dispatch (completions, chat, embeddings)
//! - The error taxonomy used across the gateway's schema layer

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod chat;
pub mod completions;
pub mod embeddings;
pub mod envelope;
pub mod error;
pub mod request;
pub mod response;
pub mod route;
pub mod types;

// Re-export commonly used types
pub use chat::{Chat, ChatCandidate, ChatRequest, ChatResponse, ResponseMessage};
pub use completions::{
    CompletionCandidate, Completions, CompletionsRequest, CompletionsResponse,
};
pub use embeddings::{EmbeddingInput, Embeddings, EmbeddingsRequest, EmbeddingsResponse};
pub use envelope::{Envelope, Extras, FieldEnum, Record};
pub use error::{FieldConstraint, GatewayError, GatewayResult};
pub use request::{GenerationParams, RequestMessage};
pub use response::{CandidateMetadata, FinishReason, ResponseMetadata};
pub use route::{RouteRequest, RouteResponse, RouteSchema};
pub use types::RouteType;
