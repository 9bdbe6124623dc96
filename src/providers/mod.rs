//! LLM Provider implementations
//!
//! This module contains implementations for the supported LLM vendors:
//!
//! - **anthropic**: Anthropic Claude provider with native Messages API format
//! - **openai**: OpenAI provider using the chat-completions API
//! - **groq**: Groq provider using its OpenAI-compatible API
//! - **ollama**: Ollama provider using the native `/api/generate` API
//! - **openai_shared**: Shared structures and utilities for OpenAI-compatible providers
//!
//! ## Architecture
//!
//! ```text
//! http.rs             <- One request, one classified error; no retries
//!      |
//! openai_shared/      <- Shared OpenAI-compatible structures and utilities
//!      |        |
//! openai.rs  groq.rs  <- Use the chat-completions API
//!
//! anthropic/          <- Uses Anthropic's native API format
//! ollama.rs           <- Uses Ollama's native generate API
//! ```

pub(crate) mod http;

pub mod anthropic;
pub mod groq;
pub mod ollama;
pub mod openai;
pub mod openai_shared;

#[cfg(test)]
mod tests;

// Re-export the provider structs
pub use anthropic::AnthropicProvider;
pub use groq::GroqProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAIProvider;
