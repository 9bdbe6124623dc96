//! Groq provider implementation
//!
//! Groq serves an OpenAI-compatible API under `/openai/v1`, so this adapter
//! reuses the shared OpenAI client. Groq has no `top_k` sampling parameter;
//! it is dropped from every request.

use super::openai_shared::OpenAICompatibleClient;
use crate::config::{AdvancedSettings, HttpSettings, ProviderConfig};
use crate::core_types::{LlmProvider, ModelDescriptor, SummaryResult};
use crate::error::LlmResult;
use crate::logging::log_debug;

/// Groq fast-inference provider
#[derive(Debug)]
pub struct GroqProvider {
    client: OpenAICompatibleClient,
}

impl GroqProvider {
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.groq.com/openai/v1";

    /// Create a new Groq provider instance
    ///
    /// # Errors
    ///
    /// Returns [`crate::LlmError::InvalidConfiguration`] if the HTTP client
    /// cannot be initialized.
    pub fn new(config: ProviderConfig, settings: &HttpSettings) -> LlmResult<Self> {
        let client =
            OpenAICompatibleClient::new("groq", &config, Self::DEFAULT_ENDPOINT, settings)?;

        log_debug!(
            provider = "groq",
            has_api_key = !config.api_key.is_empty(),
            endpoint = %client.endpoint(),
            model = %client.model(),
            "Groq provider initialized"
        );

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl LlmProvider for GroqProvider {
    async fn summarize(
        &self,
        user_prompt: &str,
        system_prompt: &str,
        settings: &AdvancedSettings,
    ) -> LlmResult<SummaryResult> {
        let request = self
            .client
            .build_request(user_prompt, system_prompt, settings);
        self.client.execute_chat_request(&request).await
    }

    async fn list_models(&self) -> LlmResult<Vec<ModelDescriptor>> {
        self.client.list_models().await
    }

    fn default_endpoint(&self) -> &'static str {
        Self::DEFAULT_ENDPOINT
    }

    fn provider_name(&self) -> &'static str {
        "groq"
    }
}
