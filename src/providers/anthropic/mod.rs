//! Anthropic Claude provider implementation
//!
//! This provider uses Anthropic's native Messages API.
//!
//! ## Module Organization
//!
//! - `types`: Request/response structures for Anthropic API
//! - `provider`: Main provider implementation

mod provider;
mod types;

#[cfg(test)]
mod tests;

pub use provider::AnthropicProvider;
