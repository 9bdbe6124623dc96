//! OpenAI provider implementation
//!
//! This provider uses the OpenAI-compatible shared structures and utilities.

use super::openai_shared::OpenAICompatibleClient;
use crate::config::{AdvancedSettings, HttpSettings, ProviderConfig};
use crate::core_types::{LlmProvider, ModelDescriptor, SummaryResult};
use crate::error::LlmResult;
use crate::logging::log_debug;

/// OpenAI provider implementation
#[derive(Debug)]
pub struct OpenAIProvider {
    client: OpenAICompatibleClient,
}

impl OpenAIProvider {
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.openai.com/v1";

    /// Create a new OpenAI provider instance
    ///
    /// # Errors
    ///
    /// Returns [`crate::LlmError::InvalidConfiguration`] if the HTTP client
    /// cannot be initialized.
    pub fn new(config: ProviderConfig, settings: &HttpSettings) -> LlmResult<Self> {
        let client =
            OpenAICompatibleClient::new("openai", &config, Self::DEFAULT_ENDPOINT, settings)?;

        log_debug!(
            provider = "openai",
            has_api_key = !config.api_key.is_empty(),
            endpoint = %client.endpoint(),
            model = %client.model(),
            "OpenAI provider initialized"
        );

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl LlmProvider for OpenAIProvider {
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
        "openai"
    }
}
