//! Evaluation integration tests
//!
//! Tests for input identity, evaluation equality and the assembly of
//! persisted records from validated gateway traffic.

use crate::fixtures::*;
use crate::helpers::*;
use gateway_core::{GatewayError, RouteType};
use gateway_evaluation::{
    generate_inputs_id, Evaluation, Feedback, FeedbackSource, FeedbackSourceType, Metric,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

fn judged(evaluation_inputs: Value, outputs: Value) -> Evaluation {
    let judge = FeedbackSource::new(FeedbackSourceType::AiJudge, "relevance-judge");
    let human = FeedbackSource::new(FeedbackSourceType::Human, "reviewer-1");

    Evaluation::builder(object(evaluation_inputs), object(outputs))
        .request_id("tr-0001")
        .feedback(vec![
            Feedback::builder("relevance", judge)
                .value(0.8)
                .rationale("mostly on topic")
                .metadata("judge_version", "3")
                .timestamp(1_700_000_000_000)
                .build()
                .unwrap(),
            Feedback::builder("thumbs_up", human)
                .value(true)
                .timestamp(1_700_000_000_500)
                .build()
                .unwrap(),
        ])
        .metrics(vec![Metric::new("latency_ms", 412.0).at(1_700_000_000_000)])
        .build()
        .unwrap()
}

/// Test identity ignores key order at every depth
#[test]
fn test_identity_key_order_independent() {
    let a = json!({"question": "q", "context": {"doc": "d", "rank": 1}});
    let b = json!({"context": {"rank": 1, "doc": "d"}, "question": "q"});
    assert_eq!(
        generate_inputs_id(&a).unwrap(),
        generate_inputs_id(&b).unwrap()
    );
}

/// Test identity distinguishes value types and shapes
#[test]
fn test_identity_sensitivity() {
    let number = generate_inputs_id(&json!({"a": 1})).unwrap();
    let string = generate_inputs_id(&json!({"a": "1"})).unwrap();
    let list = generate_inputs_id(&json!({"a": [1]})).unwrap();
    assert_eq!(
        number,
        "f9d86028c6e0d64e225186f96acb69338b2c59764df79162107f5c4bb34d1310"
    );
    assert_eq!(
        string,
        "452647e07c48d5e6dbdad452d4f4715de98ad66f3397952966e13ffa37b3523f"
    );
    assert_ne!(number, list);
    assert_ne!(string, list);
}

/// Test identity accepts typed serializable inputs
#[test]
fn test_identity_of_typed_inputs() {
    let mut typed = BTreeMap::new();
    typed.insert("b", 2);
    typed.insert("a", 1);
    assert_eq!(
        generate_inputs_id(&typed).unwrap(),
        "d8497d9d82770a70729261095aa98f7ef5154d7af499f8037b6ca250296785a6"
    );

    let err = generate_inputs_id(&[1, 2]).unwrap_err();
    assert!(matches!(err, GatewayError::IdentityDerivation { .. }));
    assert_eq!(err.error_code(), "IDENTITY_DERIVATION_ERROR");
}

/// Test logging validated gateway traffic as an evaluation
#[test]
fn test_evaluation_from_gateway_exchange() {
    init_tracing();

    let request = RouteType::Completions
        .validate_request(completions_request())
        .unwrap();
    let response = RouteType::Completions
        .validate_response(completions_response())
        .unwrap();

    let evaluation = judged(request.to_value(), response.to_value());
    assert_eq!(
        evaluation.inputs_id(),
        generate_inputs_id(&completions_request()).unwrap()
    );

    let record = evaluation.to_record("run-42", "eval-7").unwrap();
    assert_eq!(record.run_id, "run-42");
    assert_eq!(record.evaluation_id, "eval-7");
    assert_eq!(record.outputs["metadata"]["model"], json!("gpt-3.5-turbo-instruct"));

    let feedback = record.feedback.as_ref().unwrap();
    assert_eq!(feedback.len(), 2);
    assert!(feedback.iter().all(|f| f.evaluation_id == "eval-7"));
    assert_eq!(feedback[0].numeric_value, Some(0.8));
    assert_eq!(feedback[0].boolean_value, None);
    assert_eq!(feedback[1].boolean_value, Some(true));

    let persisted = serde_json::to_value(&record).unwrap();
    assert_json_contains(
        &persisted,
        &json!({
            "run_id": "run-42",
            "request_id": "tr-0001",
            "inputs": {"prompt": "Write a haiku about gateways"}
        }),
    );
    assert_eq!(persisted["feedback"][0]["source"]["source_type"], json!("AI_JUDGE"));
}

/// Test equal evaluations regardless of mapping key order
#[test]
fn test_evaluation_equality() {
    let first = judged(json!({"x": 1, "y": 2}), json!({"out": "a", "score": 1}));
    let second = judged(json!({"y": 2, "x": 1}), json!({"score": 1, "out": "a"}));
    assert_eq!(first, second);
    assert_eq!(first.inputs_id(), second.inputs_id());

    let different = judged(json!({"x": 1, "y": 2}), json!({"out": "b", "score": 1}));
    assert_ne!(first, different);
}

/// Test record assembly requires caller-assigned identifiers
#[test]
fn test_record_preconditions() {
    let evaluation = Evaluation::new(Map::new(), object(json!({"answer": 4}))).unwrap();

    assert_eq!(
        evaluation.to_record("", "").unwrap_err(),
        GatewayError::assembly_precondition("run_id")
    );
    assert_eq!(
        evaluation.to_record("run-1", "").unwrap_err(),
        GatewayError::assembly_precondition("evaluation_id")
    );

    let record = evaluation.to_record("run-1", "eval-1").unwrap();
    assert_eq!(record.feedback, None);
    assert_eq!(
        record.inputs_id,
        "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
    );
}

/// Test feedback that records a failed judgement
#[test]
fn test_error_feedback() {
    let source = FeedbackSource::new(FeedbackSourceType::Code, "regex-check");
    let feedback = Feedback::builder("format", source.clone())
        .error("TIMEOUT", "judge timed out")
        .timestamp(5)
        .build()
        .unwrap();
    let record = feedback.to_record("eval-1").unwrap();
    assert_eq!(record.error_code.as_deref(), Some("TIMEOUT"));
    assert_eq!(record.string_value, None);

    assert_eq!(
        Feedback::builder("format", source).build().unwrap_err(),
        GatewayError::missing("value")
    );
}
