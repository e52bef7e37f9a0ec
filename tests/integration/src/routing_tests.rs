//! Routing integration tests
//!
//! Tests for loading route configuration and dispatching raw payloads to
//! the envelope pair of the addressed route.

use crate::fixtures::*;
use crate::helpers::*;
use gateway_config::{ConfigError, GatewayConfig, RouteTable};
use gateway_core::{GatewayError, RouteRequest, RouteType};
use gateway_telemetry::{LogFormat, LoggingConfig};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;

fn table() -> RouteTable {
    let config = GatewayConfig::from_yaml_str(ROUTES_YAML).unwrap();
    RouteTable::from_config(&config).unwrap()
}

/// Test every route resolves to its configured type and model
#[test]
fn test_routes_resolve() {
    init_tracing();

    let table = table();
    assert_eq!(table.len(), 3);
    assert_eq!(table.route_type("completions").unwrap(), RouteType::Completions);
    assert_eq!(table.route_type("chat").unwrap(), RouteType::Chat);
    assert_eq!(table.route_type("embeddings").unwrap(), RouteType::Embeddings);

    let chat = table.resolve("chat").unwrap();
    assert_eq!(chat.model.name, "claude-2");
    assert_eq!(chat.model.config["max_retries"], json!(3));
}

/// Test the logging section overrides only the keys it names
#[test]
fn test_logging_section() {
    let config = GatewayConfig::from_yaml_str(ROUTES_YAML).unwrap();
    assert_eq!(config.logging, LoggingConfig::default().with_level("debug"));
    assert_eq!(config.logging.format, LogFormat::default());
}

/// Test each route dispatches to the matching envelopes
#[test]
fn test_dispatch_by_route_name() {
    init_tracing();

    let table = table();
    let cases = [
        ("completions", completions_request(), completions_response()),
        ("chat", chat_request(), chat_response()),
        ("embeddings", embeddings_request(), embeddings_response()),
    ];

    for (name, request, response) in cases {
        let expected = table.route_type(name).unwrap();
        let request = table.validate_request(name, request).unwrap();
        assert_eq!(request.route_type(), expected);

        let response = table.validate_response(name, response).unwrap();
        assert_eq!(response.route_type(), expected);
        assert_eq!(response.metadata().route_type, expected);
    }
}

/// Test a payload sent to the wrong route fails that route's validation
#[test]
fn test_payload_for_wrong_route() {
    let table = table();

    let err = table
        .validate_request("embeddings", completions_request())
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Schema(GatewayError::Validation { ref field, .. }) if field == "text"
    ));

    let err = table
        .validate_response("chat", completions_response())
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Schema(GatewayError::Validation { ref field, .. })
            if field == "candidates[0].message"
    ));
}

/// Test unknown route names are a configuration error
#[test]
fn test_unknown_route() {
    let table = table();
    let err = table
        .validate_request("images", json!({"prompt": "a cat"}))
        .unwrap_err();
    assert_eq!(err.to_string(), "Route not found: images");
}

/// Test loading a TOML file from disk
#[test]
fn test_toml_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(
        file,
        r#"
[logging]
level = "warn"
format = "json"

[[routes]]
name = "chat"
route_type = "llm/v1/chat"

[routes.model]
provider = "openai"
name = "gpt-4"
"#
    )
    .unwrap();

    let config = GatewayConfig::from_file(file.path()).unwrap();
    assert_eq!(config.logging.level, "warn");

    let table = RouteTable::from_config(&config).unwrap();
    let request = table
        .validate_request("chat", json!({"messages": [{"role": "user", "content": "hi"}]}))
        .unwrap();
    let RouteRequest::Chat(chat) = request else {
        panic!("expected chat request");
    };
    assert_eq!(chat.messages[0].content, "hi");
}

/// Test duplicate and empty route names are rejected at load time
#[test]
fn test_invalid_configs() {
    let duplicate = r"
routes:
  - {name: a, route_type: llm/v1/chat, model: {provider: p, name: m}}
  - {name: a, route_type: llm/v1/embeddings, model: {provider: p, name: m}}
";
    let table = GatewayConfig::from_yaml_str(duplicate)
        .and_then(|config| RouteTable::from_config(&config));
    assert!(matches!(table, Err(ConfigError::DuplicateRoute { .. })));

    let empty_model = "routes:\n  - {name: a, route_type: llm/v1/chat, model: {provider: p, name: ''}}\n";
    assert!(matches!(
        GatewayConfig::from_yaml_str(empty_model),
        Err(ConfigError::Validation(_))
    ));
}
