//! Schema integration tests
//!
//! Validation, extras preservation and canonical overrides for every route
//! type, driven through the public dispatch entry points.

use crate::fixtures::*;
use crate::helpers::*;
use gateway_core::{
    ChatResponse, CompletionsRequest, CompletionsResponse, Envelope, FieldConstraint,
    FinishReason, GatewayError, RouteRequest, RouteResponse, RouteType,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

/// Test a completions exchange survives validation unchanged
#[test]
fn test_completions_round_trip() {
    init_tracing();

    let request = RouteType::Completions
        .validate_request(completions_request())
        .unwrap();
    assert_eq!(request.to_value(), completions_request());

    let response = RouteType::Completions
        .validate_response(completions_response())
        .unwrap();
    assert_eq!(response.to_value(), completions_response());

    let RouteResponse::Completions(response) = response else {
        panic!("expected completions response");
    };
    assert_eq!(response.candidates.len(), 2);
    assert_eq!(
        response.candidates[1].metadata.finish_reason,
        Some(FinishReason::Length)
    );
    assert_eq!(response.extra["id"], json!("cmpl-123"));
    assert_eq!(response.metadata.extra["system_fingerprint"], json!("fp_42"));
    assert_eq!(response.metadata.usage_is_consistent(), Some(true));
}

/// Test chat messages keep their own extras
#[test]
fn test_chat_round_trip() {
    init_tracing();

    let request = RouteType::Chat.validate_request(chat_request()).unwrap();
    let RouteRequest::Chat(chat) = &request else {
        panic!("expected chat request");
    };
    assert_eq!(chat.messages.len(), 4);
    assert_eq!(chat.messages[3].extra["name"], json!("alice"));
    assert_eq!(chat.extra["user"], json!("tenant-7"));

    // Integer temperatures are read as numbers and written back as floats
    assert_eq!(chat.params.temperature, Some(0.0));
    assert_json_contains(
        &request.to_value(),
        &json!({"user": "tenant-7", "temperature": 0.0}),
    );

    let response = RouteType::Chat.validate_response(chat_response()).unwrap();
    assert_eq!(response.to_value(), chat_response());
    assert_eq!(response.metadata().usage_is_consistent(), None);
}

/// Test single and batch embeddings inputs
#[test]
fn test_embeddings_round_trip() {
    let request = RouteType::Embeddings
        .validate_request(embeddings_request())
        .unwrap();
    assert_eq!(request.to_value(), embeddings_request());

    let single = RouteType::Embeddings
        .validate_request(json!({"text": "solo"}))
        .unwrap();
    assert_eq!(single.to_value(), json!({"text": "solo"}));

    let response = RouteType::Embeddings
        .validate_response(embeddings_response())
        .unwrap();
    assert_eq!(response.to_value(), embeddings_response());
}

/// Test canonical values win over a colliding extra and absent optionals
/// are omitted
#[test]
fn test_canonical_override() {
    let mut request = CompletionsRequest::validate(completions_request()).unwrap();
    request.params.temperature = None;
    request.prompt = "changed".to_string();
    request
        .extra
        .insert("prompt".to_string(), json!("shadowed"));

    let record = request.to_value();
    assert_eq!(record["prompt"], json!("changed"));
    assert!(record.get("temperature").is_none());
    assert_eq!(record["logprobs"], json!(5));
}

/// Test null canonical fields are treated as absent
#[test]
fn test_null_optional_dropped() {
    let request =
        CompletionsRequest::validate(json!({"prompt": "p", "max_tokens": null})).unwrap();
    assert_eq!(request.params.max_tokens, None);
    assert_eq!(request.to_value(), json!({"prompt": "p"}));
}

/// Test missing required fields are named
#[test]
fn test_missing_required_fields() {
    assert_eq!(
        RouteType::Completions
            .validate_request(json!({"temperature": 0.5}))
            .unwrap_err(),
        GatewayError::missing("prompt")
    );
    assert_eq!(
        RouteType::Embeddings
            .validate_request(json!({}))
            .unwrap_err(),
        GatewayError::missing("text")
    );

    let mut response = completions_response();
    response["metadata"]
        .as_object_mut()
        .unwrap()
        .remove("model");
    assert_eq!(
        RouteType::Completions.validate_response(response).unwrap_err(),
        GatewayError::missing("metadata.model")
    );
}

/// Test range boundaries on generation parameters
#[test]
fn test_parameter_boundaries() {
    for accepted in [
        json!({"prompt": "p", "temperature": 0.0}),
        json!({"prompt": "p", "temperature": 2.0}),
        json!({"prompt": "p", "max_tokens": 1}),
        json!({"prompt": "p", "candidate_count": 5}),
    ] {
        assert!(CompletionsRequest::validate(accepted).is_ok());
    }

    for (rejected, field) in [
        (json!({"prompt": "p", "temperature": 2.01}), "temperature"),
        (json!({"prompt": "p", "temperature": -0.1}), "temperature"),
        (json!({"prompt": "p", "max_tokens": 0}), "max_tokens"),
        (json!({"prompt": "p", "candidate_count": 6}), "candidate_count"),
        (json!({"prompt": "p", "candidate_count": 0}), "candidate_count"),
    ] {
        match CompletionsRequest::validate(rejected).unwrap_err() {
            GatewayError::Validation {
                field: name,
                constraint: FieldConstraint::Range { .. },
            } => assert_eq!(name, field),
            other => panic!("unexpected error for {field}: {other:?}"),
        }
    }

    assert!(matches!(
        CompletionsRequest::validate(json!({"prompt": "p", "stop": []})).unwrap_err(),
        GatewayError::Validation {
            constraint: FieldConstraint::NonEmpty,
            ..
        }
    ));
}

/// Test nested errors name the full path
#[test]
fn test_nested_error_paths() {
    let mut response = chat_response();
    response["candidates"][0]["metadata"]["finish_reason"] = json!("tool_calls");

    match ChatResponse::validate(response).unwrap_err() {
        GatewayError::Validation {
            field,
            constraint: FieldConstraint::OneOf { allowed, found },
        } => {
            assert_eq!(field, "candidates[0].metadata.finish_reason");
            assert_eq!(allowed, vec!["stop", "length", "content_filter"]);
            assert_eq!(found, "tool_calls");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let mut request = chat_request();
    request["messages"][1]["content"] = json!(42);
    let err = RouteType::Chat.validate_request(request).unwrap_err();
    assert_eq!(err.field(), Some("messages[1].content"));
}

/// Test an unknown route type in response metadata is rejected
#[test]
fn test_unknown_metadata_route_type() {
    let mut response = completions_response();
    response["metadata"]["route_type"] = json!("llm/v1/images");
    let err = CompletionsResponse::validate(response).unwrap_err();
    assert_eq!(err.field(), Some("metadata.route_type"));
}

/// Test a mismatched metadata route type is accepted
#[test]
fn test_mismatched_metadata_route_type() {
    init_tracing();

    let mut response = embeddings_response();
    response["metadata"]["route_type"] = json!("llm/v1/chat");
    let response = RouteType::Embeddings.validate_response(response).unwrap();
    assert_eq!(response.route_type(), RouteType::Embeddings);
    assert_eq!(response.metadata().route_type, RouteType::Chat);
}

/// Test envelopes embed in serde-based payloads
#[test]
fn test_serde_integration() {
    #[derive(serde::Deserialize)]
    struct Batch {
        requests: Vec<CompletionsRequest>,
    }

    let batch: Batch = serde_json::from_value(json!({
        "requests": [completions_request(), {"prompt": "second"}]
    }))
    .unwrap();
    assert_eq!(batch.requests.len(), 2);
    assert_eq!(batch.requests[1].prompt, "second");

    let err = serde_json::from_value::<Batch>(json!({"requests": [{"prompt": 1}]}))
        .err()
        .unwrap();
    assert!(err.to_string().contains("`prompt`"));

    let value: Value = serde_json::to_value(&batch.requests[0]).unwrap();
    assert_eq!(value, completions_request());
}
