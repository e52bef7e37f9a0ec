//! Test helper utilities for integration tests

use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;

/// Initialize tracing for tests (only once)
static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
});

/// Initialize tracing for tests
pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// Unwrap a JSON object literal into a map
pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("Expected object, got {other}"),
    }
}

/// Assert that a JSON value contains every expected field
pub fn assert_json_contains(json: &Value, expected: &Value) {
    for (key, value) in expected.as_object().expect("Expected object") {
        assert!(json.get(key).is_some(), "Missing key '{key}' in record");
        if value.is_object() {
            assert_json_contains(&json[key], value);
        } else {
            assert_eq!(
                &json[key], value,
                "Mismatch for key '{}': expected {:?}, got {:?}",
                key, value, json[key]
            );
        }
    }
}
