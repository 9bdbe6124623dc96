//! Summarization orchestrator
//!
//! [`Summarizer`] is the entry point the extension's messaging layer calls.
//! For each request it:
//!
//! 1. Loads the provider list, selected provider index, and language from
//!    the injected [`ConfigStore`]
//! 2. Picks the provider config (request index, else stored default)
//! 3. Builds a fresh adapter through the registry
//! 4. Normalizes the page text and resolves the prompt template
//! 5. Sends exactly one request to the vendor
//! 6. Attaches the prompt and provider names to the summary
//!
//! [`Summarizer::summarize`] returns a typed [`LlmResult`];
//! [`Summarizer::handle`] is the messaging boundary and never fails.

use crate::config::{HttpSettings, ProviderConfig};
use crate::content::{hostname, normalize_whitespace};
use crate::core_types::{parse_index, ModelDescriptor, PromptSelector, SummaryResult};
use crate::error::{LlmError, LlmResult};
use crate::logging::{log_debug, log_error, log_info, log_trace, log_warn, preview};
use crate::prompts::PromptResolver;
use crate::registry::{self, ProviderKind};
use crate::store::{self, keys, ConfigStore};
use crate::tokens::estimate_prompt_tokens;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Shown when the extension has not been configured yet.
pub const SETUP_REQUIRED_MESSAGE: &str = "You have not set up your LLM provider and API key. \
Please go to the options page to set up your LLM provider and API key.";

/// One summarization request from the extension UI.
///
/// Deserializes from `{text, selectedIndex?, selectPromptIndex?}`; indices
/// may be numbers, numeric strings, `-1`, or null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawSummarizeRequest")]
pub struct SummarizeRequest {
    pub text: String,
    /// Provider config to use; `None` means the stored default.
    pub selected_index: Option<usize>,
    pub prompt: PromptSelector,
}

impl SummarizeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_selected_index(mut self, index: usize) -> Self {
        self.selected_index = Some(index);
        self
    }

    pub fn with_prompt(mut self, prompt: PromptSelector) -> Self {
        self.prompt = prompt;
        self
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSummarizeRequest {
    #[serde(default)]
    text: String,
    #[serde(default)]
    selected_index: Option<Value>,
    #[serde(default)]
    select_prompt_index: Option<Value>,
}

impl From<RawSummarizeRequest> for SummarizeRequest {
    fn from(raw: RawSummarizeRequest) -> Self {
        Self {
            text: raw.text,
            selected_index: raw.selected_index.as_ref().and_then(parse_index),
            prompt: PromptSelector::from_raw(raw.select_prompt_index.as_ref()),
        }
    }
}

/// Reply sent back over the messaging boundary.
///
/// Serializes as `{summary, promptName, providerName}` or `{error}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummarizeResponse {
    #[serde(rename_all = "camelCase")]
    Success {
        summary: String,
        prompt_name: String,
        provider_name: String,
    },
    Failure { error: String },
}

impl SummarizeResponse {
    /// Convert a pipeline outcome into the boundary shape.
    pub fn from_result(result: LlmResult<SummaryResult>) -> Self {
        match result {
            Ok(result) => Self::Success {
                summary: result.summary,
                prompt_name: result.prompt_name.unwrap_or_default(),
                provider_name: result.provider_name.unwrap_or_default(),
            },
            Err(error) => Self::Failure {
                error: boundary_message(&error),
            },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

/// Text shown to the user for a failed request.
///
/// Oversized content gets fixed guidance plus the vendor detail; every other
/// error is shown as its display text.
fn boundary_message(error: &LlmError) -> String {
    match error {
        LlmError::ContentTooLarge { message, .. } => {
            format!("{}. {message}", error.user_message())
        }
        other => other.to_string(),
    }
}

/// The stored settings a summarization needs
struct Setup {
    configs: Vec<ProviderConfig>,
    default_index: usize,
}

/// Entry point for summarization, bound to one configuration store.
pub struct Summarizer<S: ConfigStore + ?Sized> {
    store: Arc<S>,
    http: HttpSettings,
}

impl<S: ConfigStore + ?Sized> Clone for Summarizer<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            http: self.http.clone(),
        }
    }
}

impl<S: ConfigStore + ?Sized> Summarizer<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            http: HttpSettings::default(),
        }
    }

    /// Use custom HTTP timeouts for every adapter this summarizer builds.
    pub fn with_http_settings(mut self, http: HttpSettings) -> Self {
        self.http = http;
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Summarize page text with the configured provider and prompt.
    ///
    /// # Errors
    ///
    /// - [`LlmError::ConfigurationMissing`] when providers, the selected
    ///   provider index, or the language are not stored, or the stored index
    ///   is outside the provider list
    /// - [`LlmError::UnsupportedProvider`] for an unknown provider tag
    /// - [`LlmError::InvalidConfiguration`] for an unusable provider config
    /// - any adapter error ([`LlmError::ProviderError`],
    ///   [`LlmError::ContentTooLarge`], [`LlmError::InvalidResponseShape`])
    pub async fn summarize(&self, request: SummarizeRequest) -> LlmResult<SummaryResult> {
        let setup = self.load_setup().await?;
        let language = store::load_language(&*self.store)
            .await?
            .ok_or_else(|| LlmError::configuration_missing(SETUP_REQUIRED_MESSAGE))?;

        let config = select_config(&setup, request.selected_index)?;
        config.validate()?;
        let kind: ProviderKind = config.provider.parse()?;
        let provider = kind.build(config, &self.http)?;

        let content = normalize_whitespace(&request.text);
        if content.is_empty() {
            log_warn!(config_name = %config.name, "Summarizing empty page content");
        }

        let prompt = PromptResolver::new(&*self.store)
            .resolve(request.prompt, &content, &language)
            .await;

        log_info!(
            provider = %kind,
            config_name = %config.name,
            model = %config.model,
            prompt_name = %prompt.prompt_name,
            language = %language,
            content_chars = content.chars().count(),
            "Summarizing page content"
        );
        log_trace!(content_preview = %preview(&content), "Page content");

        let outcome = provider
            .summarize(
                &prompt.user_prompt,
                &prompt.system_prompt,
                &config.advanced_settings,
            )
            .await;

        let result = match outcome {
            Ok(result) => result,
            Err(error) if error.is_content_too_large() => {
                let estimated_tokens =
                    estimate_off_runtime(kind, prompt.system_prompt, prompt.user_prompt).await;
                log_warn!(
                    provider = %kind,
                    estimated_prompt_tokens = ?estimated_tokens,
                    "Page content rejected as too large"
                );
                return Err(with_token_estimate(error, estimated_tokens));
            }
            Err(error) => return Err(error),
        };

        log_debug!(
            provider = %kind,
            summary_len = result.summary.len(),
            "Summary received"
        );

        Ok(SummaryResult {
            summary: result.summary,
            prompt_name: Some(prompt.prompt_name),
            provider_name: Some(config.name.clone()),
        })
    }

    /// Messaging boundary: run [`Self::summarize`] and fold any error into
    /// `{error}`.
    pub async fn handle(&self, request: SummarizeRequest) -> SummarizeResponse {
        let response = SummarizeResponse::from_result(self.summarize(request).await);
        if let SummarizeResponse::Failure { error } = &response {
            log_error!(error = %error, "Summarize request failed");
        }
        response
    }

    /// [`Self::handle`] for a raw JSON message.
    pub async fn handle_json(&self, message: Value) -> SummarizeResponse {
        match serde_json::from_value::<SummarizeRequest>(message) {
            Ok(request) => self.handle(request).await,
            Err(e) => SummarizeResponse::from_result(Err(LlmError::invalid_configuration(
                format!("malformed summarize request: {e}"),
            ))),
        }
    }

    /// Summarize a page, applying the overrides stored for its hostname.
    ///
    /// Overrides only fill what the request leaves unset: a request
    /// provider index wins over the domain's, and a request prompt other
    /// than [`PromptSelector::UseDefault`] wins over the domain's.
    ///
    /// # Errors
    ///
    /// Same as [`Self::summarize`].
    pub async fn summarize_for_url(
        &self,
        mut request: SummarizeRequest,
        page_url: &str,
    ) -> LlmResult<SummaryResult> {
        let Some(host) = hostname(page_url) else {
            log_debug!(page_url = %page_url, "No hostname, skipping domain settings");
            return self.summarize(request).await;
        };

        let domain = match store::get_domain_settings(&*self.store, &host).await {
            Ok(domain) => domain,
            Err(e) => {
                log_warn!(hostname = %host, error = %e, "Could not load domain settings");
                None
            }
        };

        if let Some(domain) = domain {
            log_debug!(hostname = %host, settings = ?domain, "Applying domain settings");
            if request.selected_index.is_none() {
                request.selected_index = domain.selected_model_index;
            }
            if request.prompt == PromptSelector::UseDefault {
                request.prompt = domain.select_prompt_index.into();
            }
        }

        self.summarize(request).await
    }

    /// Models offered by a configured provider, for the options page.
    ///
    /// # Errors
    ///
    /// [`LlmError::ConfigurationMissing`] when no providers are stored, plus
    /// the registry and adapter errors of [`Self::summarize`].
    pub async fn list_models(
        &self,
        provider_index: Option<usize>,
    ) -> LlmResult<Vec<ModelDescriptor>> {
        let setup = self.load_setup().await?;
        let config = select_config(&setup, provider_index)?;
        let provider = registry::get_provider_with(&config.provider, config, &self.http)?;
        provider.list_models().await
    }

    async fn load_setup(&self) -> LlmResult<Setup> {
        let configs = store::load_provider_configs(&*self.store)
            .await?
            .filter(|configs| !configs.is_empty())
            .ok_or_else(|| LlmError::configuration_missing(SETUP_REQUIRED_MESSAGE))?;
        let default_index = store::load_index(&*self.store, keys::SELECTED_LLM_INDEX)
            .await?
            .ok_or_else(|| LlmError::configuration_missing(SETUP_REQUIRED_MESSAGE))?;

        Ok(Setup {
            configs,
            default_index,
        })
    }
}

/// Request index when it names a config, else the stored default.
fn select_config(setup: &Setup, requested: Option<usize>) -> LlmResult<&ProviderConfig> {
    if let Some(index) = requested {
        match setup.configs.get(index) {
            Some(config) => return Ok(config),
            None => log_warn!(
                index,
                available = setup.configs.len(),
                "Requested provider index out of range, using stored default"
            ),
        }
    }

    setup.configs.get(setup.default_index).ok_or_else(|| {
        LlmError::configuration_missing(format!(
            "{SETUP_REQUIRED_MESSAGE} (selected provider {} does not exist)",
            setup.default_index
        ))
    })
}

/// Tokenize the prompt on the blocking pool; the page may be large.
async fn estimate_off_runtime(kind: ProviderKind, system_prompt: String, user_prompt: String) -> Option<u32> {
    let task = tokio::task::spawn_blocking(move || {
        estimate_prompt_tokens(kind, &system_prompt, &user_prompt)
    });
    match task.await {
        Ok(tokens) => Some(tokens),
        Err(e) => {
            log_warn!(error = %e, "Prompt token estimate failed");
            None
        }
    }
}

/// Append the estimated prompt size to a content-too-large error.
pub(crate) fn with_token_estimate(error: LlmError, estimated_tokens: Option<u32>) -> LlmError {
    let Some(estimated_tokens) = estimated_tokens else {
        return error;
    };
    match error {
        LlmError::ContentTooLarge {
            provider,
            status,
            message,
        } => LlmError::ContentTooLarge {
            provider,
            status,
            message: format!("{message} (~{estimated_tokens} tokens)"),
        },
        other => other,
    }
}
