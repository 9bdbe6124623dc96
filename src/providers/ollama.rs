//! Ollama provider implementation
//!
//! Talks to Ollama's native `/api/generate` endpoint, which takes a single
//! prompt plus a separate `system` field rather than a message array. Every
//! advanced setting maps onto an Ollama option, so nothing is dropped.

use super::http::ProviderHttpClient;
use crate::config::{AdvancedSettings, HttpSettings, ProviderConfig};
use crate::core_types::{LlmProvider, ModelDescriptor, SummaryResult};
use crate::error::{LlmError, LlmResult};
use crate::logging::log_debug;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

/// `POST /api/generate` body
#[derive(Debug, Clone, Serialize)]
pub(crate) struct OllamaGenerateRequest {
    pub model: String,
    pub prompt: String,
    pub system: String,
    pub stream: bool,
    pub options: OllamaOptions,
}

/// Sampling options understood by Ollama
#[derive(Debug, Clone, Serialize)]
pub(crate) struct OllamaOptions {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub num_predict: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct OllamaGenerateResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
struct OllamaTagList {
    #[serde(default)]
    models: Vec<OllamaTag>,
}

#[derive(Debug, Clone, Deserialize)]
struct OllamaTag {
    name: String,
    #[serde(default)]
    model: Option<String>,
}

/// Ollama local provider implementation
#[derive(Debug)]
pub struct OllamaProvider {
    http: ProviderHttpClient,
    endpoint: String,
    model: String,
}

impl OllamaProvider {
    pub const DEFAULT_ENDPOINT: &'static str = "http://localhost:11434";

    /// Create a new Ollama provider instance. No API key is used.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::InvalidConfiguration`] if the HTTP client cannot be
    /// initialized.
    pub fn new(config: ProviderConfig, settings: &HttpSettings) -> LlmResult<Self> {
        let endpoint = config.resolved_endpoint(Self::DEFAULT_ENDPOINT);

        log_debug!(
            provider = "ollama",
            endpoint = %endpoint,
            model = %config.model,
            "Ollama provider initialized"
        );

        Ok(Self {
            http: ProviderHttpClient::new("ollama", settings)?,
            endpoint,
            model: config.model,
        })
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    pub(crate) fn build_request(
        &self,
        user_prompt: &str,
        system_prompt: &str,
        settings: &AdvancedSettings,
    ) -> OllamaGenerateRequest {
        OllamaGenerateRequest {
            model: self.model.clone(),
            prompt: user_prompt.to_string(),
            system: system_prompt.to_string(),
            stream: false,
            options: OllamaOptions {
                temperature: settings.temperature,
                top_k: settings.top_k,
                top_p: settings.top_p,
                num_predict: settings.max_tokens,
            },
        }
    }
}

#[async_trait::async_trait]
impl LlmProvider for OllamaProvider {
    async fn summarize(
        &self,
        user_prompt: &str,
        system_prompt: &str,
        settings: &AdvancedSettings,
    ) -> LlmResult<SummaryResult> {
        let url = format!("{}/api/generate", self.endpoint);
        let request = self.build_request(user_prompt, system_prompt, settings);

        log_debug!(
            provider = "ollama",
            url = %url,
            model = %self.model,
            "Sending generate request"
        );

        let response: OllamaGenerateResponse =
            self.http.post_json(&url, &Self::headers(), &request).await?;

        // Ollama may not provide usage stats
        log_debug!(
            provider = "ollama",
            prompt_eval_count = ?response.prompt_eval_count,
            eval_count = ?response.eval_count,
            "Generate usage"
        );

        let summary = response.response.ok_or_else(|| {
            LlmError::invalid_response_shape("ollama", "response is missing the `response` field")
        })?;

        Ok(SummaryResult::from_summary(summary))
    }

    async fn list_models(&self) -> LlmResult<Vec<ModelDescriptor>> {
        let url = format!("{}/api/tags", self.endpoint);
        let tags: OllamaTagList = self.http.get_json(&url, &Self::headers()).await?;

        Ok(tags
            .models
            .into_iter()
            .map(|tag| {
                let value = tag.model.unwrap_or_else(|| tag.name.clone());
                ModelDescriptor::new(tag.name, value)
            })
            .collect())
    }

    fn default_endpoint(&self) -> &'static str {
        Self::DEFAULT_ENDPOINT
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }
}
