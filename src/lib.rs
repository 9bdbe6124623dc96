//! # pagesum
//!
//! Provider-agnostic page summarization for a browser extension: pick a
//! user-configured LLM backend, fill a prompt template with the page text,
//! send one request, and normalize the reply.
//!
//! ## Key Features
//!
//! - **Multiple Providers**: OpenAI, Anthropic Claude, Ollama, and Groq behind one trait
//! - **Prompt Templates**: Stored templates with `{{content}}`/`{{language}}` placeholders
//!   and an observable fallback to a built-in template
//! - **Injected Storage**: All settings are read through the [`ConfigStore`] trait
//! - **Single Shot**: Exactly one vendor request per summarization, no retries
//!
//! ## Example
//!
//! ```rust,no_run
//! use pagesum::{MemoryStore, SummarizeRequest, Summarizer};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # async fn example() -> pagesum::LlmResult<()> {
//! let store = MemoryStore::from_json(json!({
//!     "llmConfigs": [{
//!         "name": "My OpenAI",
//!         "provider": "openai",
//!         "apiKey": "sk-...",
//!         "model": "gpt-4o-mini"
//!     }],
//!     "selectedLLMIndex": 0,
//!     "language": "English"
//! }))?;
//!
//! let summarizer = Summarizer::new(Arc::new(store));
//! let result = summarizer
//!     .summarize(SummarizeRequest::new("Page text to summarize..."))
//!     .await?;
//! println!("{}", result.summary);
//! # Ok(())
//! # }
//! ```

// Allow missing errors documentation - errors are self-documenting via type signatures
#![allow(clippy::missing_errors_doc)]

// Core types for the provider abstraction
pub mod core_types;

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

pub mod config;
pub mod content;
pub mod error;
pub mod prompts;
pub mod providers;
pub mod registry;
pub mod settings;
pub mod store;
pub mod summarizer;
pub mod tokens;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use config::{AdvancedSettings, HttpSettings, ProviderConfig};
pub use error::{LlmError, LlmResult};
pub use prompts::{PromptResolver, BUILTIN_PROMPT_NAME};
pub use providers::{AnthropicProvider, GroqProvider, OllamaProvider, OpenAIProvider};
pub use registry::{default_endpoint, get_provider, get_provider_with, ProviderKind};
pub use settings::SettingsBundle;
pub use store::{ConfigStore, DomainSettings, MemoryStore};
pub use summarizer::{SummarizeRequest, SummarizeResponse, Summarizer};

// Re-export core types
pub use core_types::{
    LlmProvider, ModelDescriptor, PromptSelector, PromptTemplate, ResolvedPrompt, SummaryResult,
};
