//! Prompt templates and selectors

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder replaced by the requested response language.
pub const LANGUAGE_PLACEHOLDER: &str = "{{language}}";

/// Placeholder replaced by the page content.
pub const CONTENT_PLACEHOLDER: &str = "{{content}}";

/// A user-defined pair of system/user prompts with placeholder tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptTemplate {
    pub name: String,
    #[serde(default)]
    pub system_prompt: String,
    #[serde(default)]
    pub user_prompt: String,
}

impl PromptTemplate {
    pub fn new(
        name: impl Into<String>,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
        }
    }
}

/// A template with placeholders substituted for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPrompt {
    pub system_prompt: String,
    pub user_prompt: String,
    /// Name of the template that was used
    pub prompt_name: String,
}

/// Which prompt template a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptSelector {
    /// A stored template by position; falls back like `UseDefault` when out of range.
    ByIndex(usize),
    /// The stored default template, or the built-in one when none is set.
    #[default]
    UseDefault,
    /// Always the built-in template.
    UseBuiltin,
}

impl PromptSelector {
    /// Interpret a raw selector as sent by the extension.
    ///
    /// Non-negative integers and numeric strings select by index. `-1`,
    /// null, absent, and anything unparsable mean "use the default".
    pub fn from_raw(raw: Option<&Value>) -> Self {
        match raw.and_then(parse_index) {
            Some(index) => Self::ByIndex(index),
            None => Self::UseDefault,
        }
    }
}

impl From<Option<usize>> for PromptSelector {
    fn from(index: Option<usize>) -> Self {
        index.map_or(Self::UseDefault, Self::ByIndex)
    }
}

/// Parse a stored or requested index.
///
/// Accepts JSON numbers and numeric strings; negative values (the UI's `-1`
/// sentinel), fractions, and everything else yield `None`. Zero is a valid
/// index.
pub fn parse_index(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<usize>().ok(),
        _ => None,
    }
}
