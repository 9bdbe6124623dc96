//! Anthropic API request and response type definitions

use serde::{Deserialize, Serialize};

/// Anthropic Messages API request structure
#[derive(Debug, Serialize, Clone)]
pub(crate) struct AnthropicRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<AnthropicMessage>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

/// Anthropic message structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub(crate) struct AnthropicMessage {
    pub role: String,
    pub content: String,
}

/// Anthropic content block structure
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "type")]
pub(crate) enum AnthropicContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    /// Any other block type (tool_use, thinking, ...) is ignored.
    #[serde(other)]
    Other,
}

/// Anthropic API response structure
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct AnthropicResponse {
    #[serde(default)]
    pub content: Vec<AnthropicContentBlock>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: Option<AnthropicUsage>,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct AnthropicUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// `GET /v1/models` response
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct AnthropicModelList {
    #[serde(default)]
    pub data: Vec<AnthropicModel>,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct AnthropicModel {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}
