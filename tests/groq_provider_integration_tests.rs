//! Integration Tests for Groq Provider HTTP Handling
//!
//! UNIT UNDER TEST: GroqProvider against a mock OpenAI-compatible server
//!
//! BUSINESS RESPONSIBILITY:
//!   - Reuse the chat-completions wire format under Groq's base URL
//!   - Drop top_k, which Groq does not accept
//!   - Report Groq's token-per-minute rejections as content too large

mod common;
use common::*;
use pagesum::providers::GroqProvider;
use pagesum::{LlmError, LlmProvider};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_provider(endpoint: &str) -> GroqProvider {
    GroqProvider::new(create_test_config("groq", endpoint), &test_http_settings()).unwrap()
}

#[tokio::test]
async fn test_summarize_success_without_top_k() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_success_response("Fast summary")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = create_provider(&format!("{}/openai/v1", mock_server.uri()));
    let settings = create_test_settings();
    assert_eq!(settings.top_k, 40);

    let result = provider.summarize("u", "s", &settings).await.unwrap();
    assert_eq!(result.summary, "Fast summary");

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("top_k").is_none(), "top_k must not be sent to Groq");
    assert_eq!(body["max_tokens"], 256);
    assert_eq!(body["top_p"], 0.9);
}

#[tokio::test]
async fn test_tokens_per_minute_rejection_is_content_too_large() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(413).set_body_json(rate_limit_error_response()))
        .mount(&mock_server)
        .await;

    let provider = create_provider(&mock_server.uri());
    let error = provider.summarize("u", "s", &create_test_settings()).await.unwrap_err();

    match error {
        LlmError::ContentTooLarge { provider, status, message } => {
            assert_eq!(provider, "groq");
            assert_eq!(status, Some(413));
            assert!(message.contains("Limit 6000"));
        }
        other => panic!("expected ContentTooLarge, got {other:?}"),
    }
}

#[test]
fn test_default_endpoint() {
    let provider = create_provider("");
    assert_eq!(provider.default_endpoint(), "https://api.groq.com/openai/v1");
    assert_eq!(provider.provider_name(), "groq");
}
