//! Settings export and import
//!
//! A [`SettingsBundle`] is the single JSON document the options page offers
//! for backup and transfer between browsers:
//!
//! ```json
//! {
//!   "domains": { "example.com": { "selectedModelIndex": 1 } },
//!   "prompts": [ { "name": "...", "systemPrompt": "...", "userPrompt": "..." } ],
//!   "options": { "llmConfigs": [ ... ], "language": "English" },
//!   "defaultPromptIndex": 0,
//!   "selectedLLMIndex": 0,
//!   "language": "English"
//! }
//! ```

use crate::config::ProviderConfig;
use crate::core_types::PromptTemplate;
use crate::error::{LlmError, LlmResult};
use crate::logging::log_info;
use crate::store::{self, keys, ConfigStore, DomainSettings};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Language written on import when the bundle does not name one.
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_configs: Option<Vec<ProviderConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Every stored setting in one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsBundle {
    #[serde(default)]
    pub domains: BTreeMap<String, DomainSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompts: Option<Vec<PromptTemplate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<SettingsOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_prompt_index: Option<Value>,
    #[serde(rename = "selectedLLMIndex", default, skip_serializing_if = "Option::is_none")]
    pub selected_llm_index: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl SettingsBundle {
    /// Snapshot everything currently stored.
    ///
    /// # Errors
    ///
    /// Returns the store's error, or [`LlmError::InvalidConfiguration`] if a
    /// stored value cannot be decoded.
    pub async fn export<S: ConfigStore + ?Sized>(store: &S) -> LlmResult<Self> {
        let language = store::load_language(store).await?;
        let bundle = Self {
            domains: store::list_domain_settings(store).await?,
            prompts: store::get_typed(store, keys::PROMPTS).await?,
            options: Some(SettingsOptions {
                llm_configs: store::load_provider_configs(store).await?,
                language: language.clone(),
            }),
            default_prompt_index: store::get_value(store, keys::DEFAULT_PROMPT_INDEX).await?,
            selected_llm_index: store::get_value(store, keys::SELECTED_LLM_INDEX).await?,
            language,
        };

        log_info!(
            domains = bundle.domains.len(),
            prompts = bundle.prompts.as_ref().map_or(0, Vec::len),
            "Settings exported"
        );

        Ok(bundle)
    }

    /// Parse an exported document.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::InvalidConfiguration`] if `json` is not a settings
    /// document.
    pub fn from_json(json: &str) -> LlmResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| LlmError::invalid_configuration(format!("invalid settings format: {e}")))
    }

    /// Serialize for download.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::InvalidConfiguration`] if serialization fails.
    pub fn to_json_pretty(&self) -> LlmResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            LlmError::invalid_configuration(format!("failed to serialize settings: {e}"))
        })
    }

    /// Write the bundle into `store`.
    ///
    /// Every existing `domainSettings.*` entry, decodable or not, is removed
    /// first so the imported set replaces them. Prompts and provider configs are only overwritten when
    /// the bundle carries them. When `options` is present the language
    /// falls back to [`DEFAULT_LANGUAGE`] and the selected provider index to
    /// `0`.
    ///
    /// # Errors
    ///
    /// Returns the store's error.
    pub async fn import<S: ConfigStore + ?Sized>(&self, store: &S) -> LlmResult<()> {
        for key in store.keys().await? {
            if key.starts_with(keys::DOMAIN_SETTINGS_PREFIX) {
                store.remove(&key).await?;
            }
        }
        for (hostname, settings) in &self.domains {
            store::set_domain_settings(store, hostname, settings).await?;
        }

        if let Some(prompts) = &self.prompts {
            store.set(keys::PROMPTS, encode(prompts)?).await?;
        }

        if let Some(options) = &self.options {
            if let Some(configs) = &options.llm_configs {
                store.set(keys::LLM_CONFIGS, encode(configs)?).await?;
                let selected = self.selected_llm_index.clone().unwrap_or(Value::from(0));
                store.set(keys::SELECTED_LLM_INDEX, selected).await?;
            }

            let language = self
                .language
                .clone()
                .or_else(|| options.language.clone())
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
            store.set(keys::LANGUAGE, Value::String(language)).await?;
        }

        if let Some(index) = &self.default_prompt_index {
            store.set(keys::DEFAULT_PROMPT_INDEX, index.clone()).await?;
        }

        log_info!(
            domains = self.domains.len(),
            prompts = self.prompts.as_ref().map_or(0, Vec::len),
            has_options = self.options.is_some(),
            "Settings imported"
        );

        Ok(())
    }
}

fn encode<T: Serialize>(value: &T) -> LlmResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| LlmError::storage(format!("failed to encode settings: {e}")))
}
