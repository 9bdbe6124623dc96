//! Integration Tests for Anthropic Provider HTTP Handling
//!
//! UNIT UNDER TEST: AnthropicProvider against a mock Messages API server
//!
//! BUSINESS RESPONSIBILITY:
//!   - Authenticate with x-api-key and pin the API version
//!   - Send the system prompt separately from the user message
//!   - Concatenate text blocks into the summary
//!   - Classify request_too_large and overload errors
//!   - List models with their display names

mod common;
use common::*;
use pagesum::providers::AnthropicProvider;
use pagesum::{AdvancedSettings, LlmError, LlmProvider, ModelDescriptor};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_provider(endpoint: &str) -> AnthropicProvider {
    AnthropicProvider::new(create_test_config("claude", endpoint), &test_http_settings()).unwrap()
}

#[tokio::test]
async fn test_summarize_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "system": "Be brief",
            "messages": [{"role": "user", "content": "Summarize: page"}],
            "max_tokens": 256,
            "top_k": 40
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_success_response("Claude summary")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = create_provider(&mock_server.uri());
    let result = provider
        .summarize("Summarize: page", "Be brief", &create_test_settings())
        .await
        .unwrap();

    assert_eq!(result.summary, "Claude summary");
    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["temperature"], 0.5);
    assert!(body.get("top_p").is_none(), "top_p must not be sent with temperature");
}

#[tokio::test]
async fn test_temperature_is_clamped_on_the_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_success_response("ok")))
        .mount(&mock_server)
        .await;

    let provider = create_provider(&mock_server.uri());
    let settings = AdvancedSettings {
        temperature: 1.8,
        ..create_test_settings()
    };
    provider.summarize("u", "s", &settings).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["temperature"], 1.0);
}

#[tokio::test]
async fn test_request_too_large_type_is_content_too_large() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(413).set_body_json(json!({
            "type": "error",
            "error": {"type": "request_too_large", "message": "Request exceeds the maximum allowed number of bytes."}
        })))
        .mount(&mock_server)
        .await;

    let provider = create_provider(&mock_server.uri());
    let error = provider.summarize("u", "s", &create_test_settings()).await.unwrap_err();

    assert!(error.is_content_too_large());
}

#[tokio::test]
async fn test_overloaded_is_provider_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(529).set_body_json(json!({
            "type": "error",
            "error": {"type": "overloaded_error", "message": "Overloaded"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = create_provider(&mock_server.uri());
    let error = provider.summarize("u", "s", &create_test_settings()).await.unwrap_err();

    match error {
        LlmError::ProviderError { status, message, .. } => {
            assert_eq!(status, Some(529));
            assert_eq!(message, "Overloaded");
        }
        other => panic!("expected ProviderError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_content_is_invalid_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
        .mount(&mock_server)
        .await;

    let provider = create_provider(&mock_server.uri());
    let error = provider.summarize("u", "s", &create_test_settings()).await.unwrap_err();

    assert!(matches!(error, LlmError::InvalidResponseShape { .. }));
}

#[tokio::test]
async fn test_list_models() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"type": "model", "id": "claude-3-5-haiku-latest", "display_name": "Claude 3.5 Haiku"},
                {"type": "model", "id": "claude-legacy"}
            ],
            "has_more": false
        })))
        .mount(&mock_server)
        .await;

    let provider = create_provider(&mock_server.uri());
    let models = provider.list_models().await.unwrap();

    assert_eq!(
        models,
        vec![
            ModelDescriptor::new("Claude 3.5 Haiku", "claude-3-5-haiku-latest"),
            ModelDescriptor::new("claude-legacy", "claude-legacy"),
        ]
    );
}
