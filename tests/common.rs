//! Test helper utilities for pagesum integration tests
//!
//! This module provides reusable fixtures and mock vendor responses that
//! are shared across the integration test files.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use pagesum::{AdvancedSettings, HttpSettings, MemoryStore, ProviderConfig};
use serde_json::{json, Value};
use std::time::Duration;

/// Short timeouts so a misconfigured mock fails fast
pub fn test_http_settings() -> HttpSettings {
    HttpSettings {
        request_timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
    }
}

/// Provider config addressed at a mock server
pub fn create_test_config(provider: &str, endpoint: &str) -> ProviderConfig {
    ProviderConfig::new(format!("Test {provider}"), provider, "test-key", "test-model")
        .with_endpoint(endpoint)
}

pub fn create_test_settings() -> AdvancedSettings {
    AdvancedSettings {
        max_tokens: 256,
        temperature: 0.5,
        top_p: 0.9,
        top_k: 40,
    }
}

/// Store with one provider selected and English as the response language
pub fn create_configured_store(configs: &[ProviderConfig]) -> MemoryStore {
    MemoryStore::from_json(json!({
        "llmConfigs": configs,
        "selectedLLMIndex": 0,
        "language": "English",
    }))
    .expect("seed is an object")
}

// ============================================================================
// Mock vendor responses
// ============================================================================

pub fn openai_success_response(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    })
}

pub fn anthropic_success_response(text: &str) -> Value {
    json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "model": "claude-3-5-haiku-latest",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 10, "output_tokens": 5}
    })
}

pub fn ollama_success_response(text: &str) -> Value {
    json!({
        "model": "llama3.2",
        "created_at": "2024-01-01T00:00:00Z",
        "response": text,
        "done": true,
        "prompt_eval_count": 10,
        "eval_count": 5
    })
}

pub fn rate_limit_error_response() -> Value {
    json!({
        "error": {
            "message": "Request too large for model. Limit 6000, Requested 9000",
            "type": "tokens",
            "code": "rate_limit_exceeded"
        }
    })
}
