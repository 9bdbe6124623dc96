//! Provider registry
//!
//! Maps a provider type tag from a stored [`ProviderConfig`] onto a freshly
//! constructed adapter. Every call builds a new adapter; nothing is cached
//! or shared between requests.

use crate::config::{HttpSettings, ProviderConfig};
use crate::core_types::LlmProvider;
use crate::error::{LlmError, LlmResult};
use crate::logging::log_debug;
use crate::providers::{AnthropicProvider, GroqProvider, OllamaProvider, OpenAIProvider};
use std::fmt;
use std::str::FromStr;

/// Supported vendor families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAI,
    Claude,
    Ollama,
    Groq,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [Self::OpenAI, Self::Claude, Self::Ollama, Self::Groq];

    /// Canonical tag as stored by the extension
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Claude => "claude",
            Self::Ollama => "ollama",
            Self::Groq => "groq",
        }
    }

    /// Vendor well-known base URL
    pub fn default_endpoint(self) -> &'static str {
        match self {
            Self::OpenAI => OpenAIProvider::DEFAULT_ENDPOINT,
            Self::Claude => AnthropicProvider::DEFAULT_ENDPOINT,
            Self::Ollama => OllamaProvider::DEFAULT_ENDPOINT,
            Self::Groq => GroqProvider::DEFAULT_ENDPOINT,
        }
    }

    /// Construct the adapter for this vendor
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::InvalidConfiguration`] if the HTTP client cannot be
    /// initialized.
    pub fn build(
        self,
        config: &ProviderConfig,
        settings: &HttpSettings,
    ) -> LlmResult<Box<dyn LlmProvider>> {
        let config = config.clone();
        let provider: Box<dyn LlmProvider> = match self {
            Self::OpenAI => Box::new(OpenAIProvider::new(config, settings)?),
            Self::Claude => Box::new(AnthropicProvider::new(config, settings)?),
            Self::Ollama => Box::new(OllamaProvider::new(config, settings)?),
            Self::Groq => Box::new(GroqProvider::new(config, settings)?),
        };
        Ok(provider)
    }
}

impl FromStr for ProviderKind {
    type Err = LlmError;

    /// Parse a provider tag, case-insensitively. Vendor-neutral aliases
    /// (`openai-style`, `anthropic-style`, `local-inference`,
    /// `fast-inference`) are accepted alongside the canonical tags.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_lowercase().as_str() {
            "openai" | "openai-style" => Ok(Self::OpenAI),
            "claude" | "anthropic" | "anthropic-style" => Ok(Self::Claude),
            "ollama" | "local-inference" => Ok(Self::Ollama),
            "groq" | "fast-inference" => Ok(Self::Groq),
            _ => Err(LlmError::unsupported_provider(tag)),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build a new adapter for `provider_type` with default HTTP settings.
///
/// # Errors
///
/// Returns [`LlmError::UnsupportedProvider`] for an unknown tag.
pub fn get_provider(
    provider_type: &str,
    config: &ProviderConfig,
) -> LlmResult<Box<dyn LlmProvider>> {
    get_provider_with(provider_type, config, &HttpSettings::default())
}

/// Build a new adapter for `provider_type` with explicit HTTP settings.
///
/// # Errors
///
/// Returns [`LlmError::UnsupportedProvider`] for an unknown tag, or
/// [`LlmError::InvalidConfiguration`] if the HTTP client cannot be built.
pub fn get_provider_with(
    provider_type: &str,
    config: &ProviderConfig,
    settings: &HttpSettings,
) -> LlmResult<Box<dyn LlmProvider>> {
    let kind: ProviderKind = provider_type.parse()?;

    log_debug!(
        provider = %kind,
        config_name = %config.name,
        model = %config.model,
        "Creating provider"
    );

    kind.build(config, settings)
}

/// Well-known endpoint for `provider_type`. Pure lookup, no I/O.
///
/// # Errors
///
/// Returns [`LlmError::UnsupportedProvider`] for an unknown tag.
pub fn default_endpoint(provider_type: &str) -> LlmResult<&'static str> {
    provider_type
        .parse::<ProviderKind>()
        .map(ProviderKind::default_endpoint)
}
