//! Unit Tests for the Ollama generate request
//!
//! UNIT UNDER TEST: OllamaProvider::build_request

use crate::config::{AdvancedSettings, HttpSettings, ProviderConfig};
use crate::providers::OllamaProvider;

#[test]
fn test_build_request_maps_every_setting_to_options() {
    let config = ProviderConfig::new("Local", "ollama", "", "llama3.2");
    let provider = OllamaProvider::new(config, &HttpSettings::default()).unwrap();
    let settings = AdvancedSettings {
        max_tokens: 512,
        temperature: 0.2,
        top_p: 0.95,
        top_k: 20,
    };

    let request = provider.build_request("Page text", "You summarize", &settings);
    let body = serde_json::to_value(&request).unwrap();

    assert_eq!(body["model"], "llama3.2");
    assert_eq!(body["prompt"], "Page text");
    assert_eq!(body["system"], "You summarize");
    assert_eq!(body["stream"], false);
    assert_eq!(body["options"]["temperature"], 0.2);
    assert_eq!(body["options"]["top_k"], 20);
    assert_eq!(body["options"]["top_p"], 0.95);
    assert_eq!(body["options"]["num_predict"], 512);
}
