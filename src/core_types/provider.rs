//! Provider trait and types for LLM abstraction
//!
//! Defines the `LlmProvider` trait that all vendor adapters implement, along
//! with the normalized summary and model-listing types.

use crate::config::AdvancedSettings;
use crate::error::LlmResult;
use serde::{Deserialize, Serialize};

/// Normalized result of one summarization.
///
/// Adapters fill only `summary`; the orchestrator attaches the prompt and
/// provider names before returning it to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
}

impl SummaryResult {
    /// Result carrying only the vendor's summary text
    pub fn from_summary(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            prompt_name: None,
            provider_name: None,
        }
    }
}

/// One entry of a vendor's model catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Display label
    pub name: String,
    /// Identifier to send in requests
    pub value: String,
}

impl ModelDescriptor {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Trait for LLM vendor adapters to implement
///
/// Each adapter is bound at construction to one `ProviderConfig` and issues
/// exactly one HTTP request per call. Implementations never retry.
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync + std::fmt::Debug {
    /// Send one summarization request.
    ///
    /// Advanced settings the vendor does not support are dropped silently.
    ///
    /// # Errors
    ///
    /// - [`crate::LlmError::ProviderError`] on network failure or non-success status
    /// - [`crate::LlmError::ContentTooLarge`] when the vendor rejects the payload size
    /// - [`crate::LlmError::InvalidResponseShape`] when a 2xx body lacks the summary field
    async fn summarize(
        &self,
        user_prompt: &str,
        system_prompt: &str,
        settings: &AdvancedSettings,
    ) -> LlmResult<SummaryResult>;

    /// Query the vendor's model catalog.
    async fn list_models(&self) -> LlmResult<Vec<ModelDescriptor>>;

    /// Vendor well-known base URL. Pure, no I/O.
    fn default_endpoint(&self) -> &'static str;

    /// Get provider name for logging and debugging
    fn provider_name(&self) -> &'static str;
}
