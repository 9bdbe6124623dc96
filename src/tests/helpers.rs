// Shared fixtures for unit tests

use crate::config::ProviderConfig;
use crate::core_types::PromptTemplate;
use crate::store::MemoryStore;
use serde_json::{json, Value};

/// Provider config pointing at `endpoint` (usually unreachable in unit tests)
pub fn provider_config(name: &str, provider: &str, endpoint: &str) -> ProviderConfig {
    ProviderConfig::new(name, provider, "test-key", "test-model").with_endpoint(endpoint)
}

pub fn template(name: &str, system: &str, user: &str) -> PromptTemplate {
    PromptTemplate::new(name, system, user)
}

/// Store holding a complete setup with the given providers
pub fn configured_store(configs: &[ProviderConfig], selected: Value) -> MemoryStore {
    MemoryStore::from_json(json!({
        "llmConfigs": configs,
        "selectedLLMIndex": selected,
        "language": "English",
    }))
    .expect("seed is an object")
}
