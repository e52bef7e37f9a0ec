//! Test fixtures and sample data for integration tests

use serde_json::{json, Value};

/// Sample configuration with one route per route type
pub const ROUTES_YAML: &str = r"
routes:
  - name: completions
    route_type: llm/v1/completions
    model:
      provider: openai
      name: gpt-3.5-turbo-instruct
  - name: chat
    route_type: llm/v1/chat
    model:
      provider: anthropic
      name: claude-2
      config:
        max_retries: 3
  - name: embeddings
    route_type: llm/v1/embeddings
    model:
      provider: cohere
      name: embed-english-v2.0
logging:
  level: debug
";

/// Completions request with every canonical parameter and a provider extra
pub fn completions_request() -> Value {
    json!({
        "prompt": "Write a haiku about gateways",
        "temperature": 0.7,
        "max_tokens": 64,
        "stop": ["\n\n"],
        "candidate_count": 2,
        "logprobs": 5
    })
}

/// Completions response with candidate- and response-level extras
pub fn completions_response() -> Value {
    json!({
        "id": "cmpl-123",
        "candidates": [
            {
                "text": "Requests flow in",
                "metadata": {"finish_reason": "stop", "logprobs": null}
            },
            {
                "text": "Tokens drift",
                "metadata": {"finish_reason": "length"}
            }
        ],
        "metadata": {
            "input_tokens": 6,
            "output_tokens": 10,
            "total_tokens": 16,
            "model": "gpt-3.5-turbo-instruct",
            "route_type": "llm/v1/completions",
            "system_fingerprint": "fp_42"
        }
    })
}

/// Multi-turn chat request
pub fn chat_request() -> Value {
    json!({
        "messages": [
            {"role": "system", "content": "You are terse."},
            {"role": "user", "content": "What is 2 + 2?"},
            {"role": "assistant", "content": "4"},
            {"role": "user", "content": "And times 3?", "name": "alice"}
        ],
        "temperature": 0,
        "user": "tenant-7"
    })
}

/// Chat response without usage counts
pub fn chat_response() -> Value {
    json!({
        "candidates": [
            {
                "message": {"role": "assistant", "content": "12"},
                "metadata": {"finish_reason": "stop"}
            }
        ],
        "metadata": {"model": "claude-2", "route_type": "llm/v1/chat"}
    })
}

/// Batch embeddings request
pub fn embeddings_request() -> Value {
    json!({"text": ["first", "second"], "truncate": "END"})
}

/// Embeddings response matching the batch request
pub fn embeddings_response() -> Value {
    json!({
        "embeddings": [[0.1, -0.2, 0.3], [0.4, 0.5, -0.6]],
        "metadata": {
            "input_tokens": 4,
            "model": "embed-english-v2.0",
            "route_type": "llm/v1/embeddings"
        }
    })
}
