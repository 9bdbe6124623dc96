//! Core types for the provider-agnostic summarization pipeline
//!
//! ## Organization
//! - `provider` - The `LlmProvider` trait and normalized result types
//! - `prompts` - Prompt templates, resolved prompts, and selectors

pub mod prompts;
pub mod provider;

pub use prompts::{
    parse_index, PromptSelector, PromptTemplate, ResolvedPrompt, CONTENT_PLACEHOLDER,
    LANGUAGE_PLACEHOLDER,
};
pub use provider::{LlmProvider, ModelDescriptor, SummaryResult};
