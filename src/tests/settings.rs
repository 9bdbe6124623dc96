// Unit Tests for Settings Export/Import
//
// UNIT UNDER TEST: SettingsBundle
//
// BUSINESS RESPONSIBILITY:
//   - Exports every stored setting as one document
//   - Imports a document, replacing domain overrides
//   - Applies the same defaults the options page applies on import

use crate::settings::{SettingsBundle, DEFAULT_LANGUAGE};
use crate::store::{self, keys, ConfigStore, MemoryStore};
use crate::tests::helpers::{configured_store, provider_config, template};
use serde_json::json;

#[cfg(test)]
mod export_tests {
    use super::*;

    #[tokio::test]
    async fn test_export_collects_everything() {
        // Arrange
        let store = configured_store(&[provider_config("A", "openai", "")], json!(0));
        store.set(keys::PROMPTS, json!([template("P", "s", "u {{content}}")])).await.unwrap();
        store.set(keys::DEFAULT_PROMPT_INDEX, json!("0")).await.unwrap();
        store
            .set("domainSettings.example.com", json!({"selectedModelIndex": 0}))
            .await
            .unwrap();

        // Act
        let bundle = SettingsBundle::export(&store).await.unwrap();
        let value = serde_json::to_value(&bundle).unwrap();

        // Assert
        assert_eq!(value["options"]["llmConfigs"][0]["name"], "A");
        assert_eq!(value["options"]["language"], "English");
        assert_eq!(value["language"], "English");
        assert_eq!(value["selectedLLMIndex"], 0);
        assert_eq!(value["defaultPromptIndex"], "0");
        assert_eq!(value["prompts"][0]["name"], "P");
        assert_eq!(value["domains"]["example.com"]["selectedModelIndex"], 0);
    }

    #[tokio::test]
    async fn test_export_import_into_empty_store_preserves_settings() {
        let source = configured_store(&[provider_config("A", "claude", "")], json!(0));
        store::set_domain_settings(&source, "a.com", &Default::default()).await.unwrap();

        let json = SettingsBundle::export(&source).await.unwrap().to_json_pretty().unwrap();
        let target = MemoryStore::new();
        SettingsBundle::from_json(&json).unwrap().import(&target).await.unwrap();

        assert_eq!(
            store::load_provider_configs(&target).await.unwrap(),
            store::load_provider_configs(&source).await.unwrap()
        );
        assert_eq!(store::load_language(&target).await.unwrap().as_deref(), Some("English"));
        assert_eq!(store::list_domain_settings(&target).await.unwrap().len(), 1);
    }
}

#[cfg(test)]
mod import_tests {
    use super::*;

    #[tokio::test]
    async fn test_import_replaces_domain_overrides() {
        let store = MemoryStore::from_json(json!({
            "domainSettings.old.com": {"selectedModelIndex": 1}
        }))
        .unwrap();
        let bundle = SettingsBundle::from_json(
            r#"{"domains": {"new.com": {"selectPromptIndex": 0}}}"#,
        )
        .unwrap();

        bundle.import(&store).await.unwrap();

        let domains = store::list_domain_settings(&store).await.unwrap();
        assert_eq!(domains.keys().collect::<Vec<_>>(), vec!["new.com"]);
        assert_eq!(domains["new.com"].select_prompt_index, Some(0));
    }

    #[tokio::test]
    async fn test_import_removes_malformed_domain_overrides() {
        // Arrange
        let store = MemoryStore::from_json(json!({
            "domainSettings.broken.com": "not an object",
            "language": "English"
        }))
        .unwrap();
        let bundle = SettingsBundle::from_json(r#"{"domains": {}}"#).unwrap();

        // Act
        bundle.import(&store).await.unwrap();

        // Assert
        assert_eq!(store.get("domainSettings.broken.com").await.unwrap(), None);
        assert_eq!(store.get(keys::LANGUAGE).await.unwrap(), Some(json!("English")));
    }

    #[tokio::test]
    async fn test_import_applies_defaults_with_options() {
        let store = MemoryStore::new();
        let bundle = SettingsBundle::from_json(
            r#"{"options": {"llmConfigs": [{"name": "L", "provider": "ollama", "model": "llama3.2"}]}}"#,
        )
        .unwrap();

        bundle.import(&store).await.unwrap();

        assert_eq!(store.get(keys::SELECTED_LLM_INDEX).await.unwrap(), Some(json!(0)));
        assert_eq!(
            store.get(keys::LANGUAGE).await.unwrap(),
            Some(json!(DEFAULT_LANGUAGE))
        );
    }

    #[tokio::test]
    async fn test_import_without_prompts_keeps_existing() {
        let store = MemoryStore::from_json(json!({"prompts": [{"name": "Mine", "userPrompt": "{{content}}"}]}))
            .unwrap();

        SettingsBundle::default().import(&store).await.unwrap();

        assert_eq!(store::load_prompts(&store).await.unwrap()[0].name, "Mine");
    }

    #[test]
    fn test_from_json_rejects_non_documents() {
        assert!(SettingsBundle::from_json("[1, 2, 3]").is_err());
        assert!(SettingsBundle::from_json("not json").is_err());
    }
}
