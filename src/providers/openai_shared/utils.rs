//! HTTP client and conversion utilities for OpenAI-compatible providers
//!
//! OpenAI and Groq share the chat-completions wire format and bearer-token
//! authentication; they differ only in base URL and display name.

use super::types::*;
use crate::config::{AdvancedSettings, HttpSettings, ProviderConfig};
use crate::core_types::{ModelDescriptor, SummaryResult};
use crate::error::{LlmError, LlmResult};
use crate::logging::{log_debug, log_trace};
use crate::providers::http::{header_value, ProviderHttpClient};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

/// HTTP client for OpenAI-compatible chat-completion APIs
#[derive(Debug)]
pub struct OpenAICompatibleClient {
    http: ProviderHttpClient,
    provider: &'static str,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAICompatibleClient {
    /// Create a client bound to one provider configuration
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::InvalidConfiguration`] if the HTTP client cannot be built.
    pub fn new(
        provider: &'static str,
        config: &ProviderConfig,
        default_endpoint: &str,
        settings: &HttpSettings,
    ) -> LlmResult<Self> {
        Ok(Self {
            http: ProviderHttpClient::new(provider, settings)?,
            provider,
            endpoint: config.resolved_endpoint(default_endpoint),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build headers for OpenAI-compatible APIs.
    ///
    /// An empty API key sends no `Authorization` header, which keeps
    /// self-hosted OpenAI-compatible servers usable.
    pub fn build_auth_headers(&self) -> LlmResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if !self.api_key.is_empty() {
            headers.insert(
                AUTHORIZATION,
                header_value(self.provider, &format!("Bearer {}", self.api_key))?,
            );
        }
        Ok(headers)
    }

    /// Build the chat-completion body: system message, user message, and the
    /// sampling fields the API accepts. `top_k` has no equivalent and is dropped.
    pub fn build_request(
        &self,
        user_prompt: &str,
        system_prompt: &str,
        settings: &AdvancedSettings,
    ) -> OpenAIRequest {
        log_trace!(
            provider = self.provider,
            dropped_top_k = settings.top_k,
            "top_k is not supported by OpenAI-compatible APIs"
        );

        OpenAIRequest {
            model: self.model.clone(),
            messages: vec![
                OpenAIMessage::system(system_prompt),
                OpenAIMessage::user(user_prompt),
            ],
            max_tokens: Some(settings.max_tokens),
            temperature: Some(settings.temperature),
            top_p: Some(settings.top_p),
            stream: None,
        }
    }

    /// Send a chat-completion request and extract the summary text
    pub async fn execute_chat_request(&self, request: &OpenAIRequest) -> LlmResult<SummaryResult> {
        let url = format!("{}/chat/completions", self.endpoint);
        let headers = self.build_auth_headers()?;

        log_debug!(
            provider = self.provider,
            url = %url,
            model = %request.model,
            "Sending chat completion request"
        );

        let response: OpenAIResponse = self.http.post_json(&url, &headers, request).await?;
        let summary = extract_summary(self.provider, response)?;
        Ok(SummaryResult::from_summary(summary))
    }

    /// List models from `GET {endpoint}/models`
    pub async fn list_models(&self) -> LlmResult<Vec<ModelDescriptor>> {
        let url = format!("{}/models", self.endpoint);
        let headers = self.build_auth_headers()?;
        let list: OpenAIModelList = self.http.get_json(&url, &headers).await?;

        Ok(list
            .data
            .into_iter()
            .map(|m| ModelDescriptor::new(m.id.clone(), m.id))
            .collect())
    }
}

/// Pull `choices[0].message.content` out of a chat-completion response.
///
/// # Errors
///
/// Returns [`LlmError::InvalidResponseShape`] when there is no first choice,
/// no message, or no content.
pub fn extract_summary(provider: &str, response: OpenAIResponse) -> LlmResult<String> {
    if let Some(usage) = &response.usage {
        log_debug!(
            provider = provider,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            total_tokens = usage.total_tokens,
            "Chat completion usage"
        );
    }

    let choice = response.choices.into_iter().next().ok_or_else(|| {
        LlmError::invalid_response_shape(provider, "response has no choices[0]")
    })?;
    let message = choice.message.ok_or_else(|| {
        LlmError::invalid_response_shape(provider, "response is missing choices[0].message")
    })?;
    let content = message.content.ok_or_else(|| {
        LlmError::invalid_response_shape(
            provider,
            "response is missing choices[0].message.content",
        )
    })?;

    Ok(content.trim().to_string())
}
