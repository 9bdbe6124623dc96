//! Configuration store abstraction
//!
//! The extension persists its settings in a flat key-value store. The
//! pipeline only reads and writes through [`ConfigStore`], so the concrete
//! backend (browser sync storage, a file, a test double) is injected.
//!
//! A stored JSON `null` is treated the same as an absent key.

use crate::config::ProviderConfig;
use crate::core_types::{parse_index, PromptTemplate};
use crate::error::{LlmError, LlmResult};
use crate::logging::{log_debug, log_warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Storage keys written by the extension UI
pub mod keys {
    pub const LLM_CONFIGS: &str = "llmConfigs";
    pub const SELECTED_LLM_INDEX: &str = "selectedLLMIndex";
    pub const LANGUAGE: &str = "language";
    pub const PROMPTS: &str = "prompts";
    pub const DEFAULT_PROMPT_INDEX: &str = "defaultPromptIndex";
    pub const DOMAIN_SETTINGS_PREFIX: &str = "domainSettings.";

    /// Key holding the overrides for one hostname
    pub fn domain_settings(hostname: &str) -> String {
        format!("{DOMAIN_SETTINGS_PREFIX}{hostname}")
    }
}

/// Async key-value store holding the extension settings
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read one key. `Ok(None)` when absent.
    async fn get(&self, key: &str) -> LlmResult<Option<Value>>;

    async fn set(&self, key: &str, value: Value) -> LlmResult<()>;

    async fn remove(&self, key: &str) -> LlmResult<()>;

    /// Every key currently stored
    async fn keys(&self) -> LlmResult<Vec<String>>;
}

/// In-memory [`ConfigStore`]; clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store from a JSON object, one entry per top-level key.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::InvalidConfiguration`] if `value` is not an object.
    pub fn from_json(value: Value) -> LlmResult<Self> {
        let Value::Object(map) = value else {
            return Err(LlmError::invalid_configuration(
                "store seed must be a JSON object",
            ));
        };
        Ok(Self {
            data: Arc::new(RwLock::new(map.into_iter().collect())),
        })
    }
}

#[async_trait::async_trait]
impl ConfigStore for MemoryStore {
    async fn get(&self, key: &str) -> LlmResult<Option<Value>> {
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> LlmResult<()> {
        self.data.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> LlmResult<()> {
        self.data.write().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> LlmResult<Vec<String>> {
        let mut keys: Vec<String> = self.data.read().await.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

// ============================================================================
// Typed accessors
// ============================================================================

/// Read a key, treating `null` as absent.
pub async fn get_value<S: ConfigStore + ?Sized>(store: &S, key: &str) -> LlmResult<Option<Value>> {
    Ok(store.get(key).await?.filter(|v| !v.is_null()))
}

/// Read and decode a key.
///
/// # Errors
///
/// Returns [`LlmError::InvalidConfiguration`] if the stored value does not
/// decode as `T`, or the store's own error.
pub async fn get_typed<T, S>(store: &S, key: &str) -> LlmResult<Option<T>>
where
    T: DeserializeOwned,
    S: ConfigStore + ?Sized,
{
    match get_value(store, key).await? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| LlmError::invalid_configuration(format!("stored `{key}` is malformed: {e}"))),
        None => Ok(None),
    }
}

/// Read an index key; `-1`, null, and non-numeric values are `None`.
pub async fn load_index<S: ConfigStore + ?Sized>(store: &S, key: &str) -> LlmResult<Option<usize>> {
    Ok(get_value(store, key).await?.as_ref().and_then(parse_index))
}

/// Stored provider list, `None` when never configured.
pub async fn load_provider_configs<S: ConfigStore + ?Sized>(
    store: &S,
) -> LlmResult<Option<Vec<ProviderConfig>>> {
    get_typed(store, keys::LLM_CONFIGS).await
}

/// Stored response language; an empty string counts as unset.
pub async fn load_language<S: ConfigStore + ?Sized>(store: &S) -> LlmResult<Option<String>> {
    let language: Option<String> = get_typed(store, keys::LANGUAGE).await?;
    Ok(language.filter(|l| !l.trim().is_empty()))
}

/// Stored prompt templates, empty when none are saved.
pub async fn load_prompts<S: ConfigStore + ?Sized>(store: &S) -> LlmResult<Vec<PromptTemplate>> {
    Ok(get_typed(store, keys::PROMPTS).await?.unwrap_or_default())
}

// ============================================================================
// Per-domain overrides
// ============================================================================

/// Model and prompt overrides applied to pages from one hostname
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainSettings {
    #[serde(
        default,
        deserialize_with = "deserialize_index",
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_model_index: Option<usize>,
    #[serde(
        default,
        deserialize_with = "deserialize_index",
        skip_serializing_if = "Option::is_none"
    )]
    pub select_prompt_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_config_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_name: Option<String>,
}

fn deserialize_index<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(parse_index))
}

/// Overrides stored for `hostname`, if any. Malformed entries are ignored.
pub async fn get_domain_settings<S: ConfigStore + ?Sized>(
    store: &S,
    hostname: &str,
) -> LlmResult<Option<DomainSettings>> {
    let key = keys::domain_settings(hostname);
    let Some(value) = get_value(store, &key).await? else {
        return Ok(None);
    };
    match serde_json::from_value(value) {
        Ok(settings) => Ok(Some(settings)),
        Err(e) => {
            log_warn!(key = %key, error = %e, "Ignoring malformed domain settings");
            Ok(None)
        }
    }
}

pub async fn set_domain_settings<S: ConfigStore + ?Sized>(
    store: &S,
    hostname: &str,
    settings: &DomainSettings,
) -> LlmResult<()> {
    let value = serde_json::to_value(settings)
        .map_err(|e| LlmError::storage(format!("failed to encode domain settings: {e}")))?;
    log_debug!(hostname = %hostname, "Saving domain settings");
    store.set(&keys::domain_settings(hostname), value).await
}

pub async fn remove_domain_settings<S: ConfigStore + ?Sized>(
    store: &S,
    hostname: &str,
) -> LlmResult<()> {
    store.remove(&keys::domain_settings(hostname)).await
}

/// Every hostname with stored overrides, sorted by hostname.
pub async fn list_domain_settings<S: ConfigStore + ?Sized>(
    store: &S,
) -> LlmResult<BTreeMap<String, DomainSettings>> {
    let mut domains = BTreeMap::new();
    for key in store.keys().await? {
        let Some(hostname) = key.strip_prefix(keys::DOMAIN_SETTINGS_PREFIX) else {
            continue;
        };
        if let Some(settings) = get_domain_settings(store, hostname).await? {
            domains.insert(hostname.to_string(), settings);
        }
    }
    Ok(domains)
}
