//! Anthropic provider implementation

use super::types::{
    AnthropicContentBlock, AnthropicMessage, AnthropicModelList, AnthropicRequest,
    AnthropicResponse,
};
use crate::config::{AdvancedSettings, HttpSettings, ProviderConfig};
use crate::core_types::{LlmProvider, ModelDescriptor, SummaryResult};
use crate::error::{LlmError, LlmResult};
use crate::logging::log_debug;
use crate::providers::http::{header_value, ProviderHttpClient};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic accepts temperatures in `[0, 1]` only.
const MAX_TEMPERATURE: f64 = 1.0;

/// Anthropic Claude provider implementation
#[derive(Debug)]
pub struct AnthropicProvider {
    http: ProviderHttpClient,
    endpoint: String,
    api_key: String,
    model: String,
}

impl AnthropicProvider {
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.anthropic.com";

    /// Create a new Anthropic provider instance
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::InvalidConfiguration`] if the HTTP client cannot be
    /// initialized.
    pub fn new(config: ProviderConfig, settings: &HttpSettings) -> LlmResult<Self> {
        let endpoint = config.resolved_endpoint(Self::DEFAULT_ENDPOINT);

        log_debug!(
            provider = "claude",
            has_api_key = !config.api_key.is_empty(),
            endpoint = %endpoint,
            model = %config.model,
            "Anthropic provider initialized"
        );

        Ok(Self {
            http: ProviderHttpClient::new("claude", settings)?,
            endpoint,
            api_key: config.api_key,
            model: config.model,
        })
    }

    /// Headers required by the Anthropic API
    fn build_headers(&self) -> LlmResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("x-api-key", header_value("claude", &self.api_key)?);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        Ok(headers)
    }

    /// The system prompt travels in the top-level `system` field; the
    /// messages array carries only the user turn. Current Claude models
    /// reject `temperature` together with `top_p`, so `top_p` is dropped.
    pub(crate) fn build_request(
        &self,
        user_prompt: &str,
        system_prompt: &str,
        settings: &AdvancedSettings,
    ) -> AnthropicRequest {
        let temperature = settings.temperature.min(MAX_TEMPERATURE);
        if temperature < settings.temperature {
            log_debug!(
                provider = "claude",
                requested = settings.temperature,
                applied = temperature,
                "Clamped temperature to Anthropic's supported range"
            );
        }

        log_debug!(
            provider = "claude",
            dropped_top_p = settings.top_p,
            "top_p is not sent alongside temperature to the Messages API"
        );

        AnthropicRequest {
            model: self.model.clone(),
            system: (!system_prompt.is_empty()).then(|| system_prompt.to_string()),
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: user_prompt.to_string(),
            }],
            max_tokens: settings.max_tokens,
            temperature: Some(temperature),
            top_k: Some(settings.top_k),
        }
    }

    /// Join every text block; non-text blocks are skipped.
    pub(crate) fn extract_text(response: AnthropicResponse) -> LlmResult<String> {
        if let Some(usage) = &response.usage {
            log_debug!(
                provider = "claude",
                model = ?response.model,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                stop_reason = ?response.stop_reason,
                "Messages API usage"
            );
        }

        let texts: Vec<String> = response
            .content
            .into_iter()
            .filter_map(|block| match block {
                AnthropicContentBlock::Text { text } => Some(text),
                AnthropicContentBlock::Other => None,
            })
            .collect();

        if texts.is_empty() {
            return Err(LlmError::invalid_response_shape(
                "claude",
                "response has no text content block",
            ));
        }

        Ok(texts.join("\n"))
    }
}

#[async_trait::async_trait]
impl LlmProvider for AnthropicProvider {
    async fn summarize(
        &self,
        user_prompt: &str,
        system_prompt: &str,
        settings: &AdvancedSettings,
    ) -> LlmResult<SummaryResult> {
        let url = format!("{}/v1/messages", self.endpoint);
        let headers = self.build_headers()?;
        let request = self.build_request(user_prompt, system_prompt, settings);

        log_debug!(
            provider = "claude",
            url = %url,
            model = %self.model,
            "Sending messages request"
        );

        let response: AnthropicResponse = self.http.post_json(&url, &headers, &request).await?;
        let summary = Self::extract_text(response)?;
        Ok(SummaryResult::from_summary(summary))
    }

    async fn list_models(&self) -> LlmResult<Vec<ModelDescriptor>> {
        let url = format!("{}/v1/models", self.endpoint);
        let headers = self.build_headers()?;
        let list: AnthropicModelList = self.http.get_json(&url, &headers).await?;

        Ok(list
            .data
            .into_iter()
            .map(|m| {
                let name = m.display_name.unwrap_or_else(|| m.id.clone());
                ModelDescriptor::new(name, m.id)
            })
            .collect())
    }

    fn default_endpoint(&self) -> &'static str {
        Self::DEFAULT_ENDPOINT
    }

    fn provider_name(&self) -> &'static str {
        "claude"
    }
}
