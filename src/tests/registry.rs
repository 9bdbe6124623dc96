// Unit Tests for the Provider Registry
//
// UNIT UNDER TEST: get_provider, default_endpoint, ProviderKind
//
// BUSINESS RESPONSIBILITY:
//   - Maps provider tags (canonical and vendor-neutral aliases) to adapters
//   - Builds a fresh adapter per call
//   - Rejects unknown tags with UnsupportedProvider
//   - Reports each vendor's well-known endpoint without I/O

use crate::error::LlmError;
use crate::registry::{default_endpoint, get_provider, ProviderKind};
use crate::tests::helpers::provider_config;

#[cfg(test)]
mod provider_kind_tests {
    use super::*;

    #[test]
    fn test_canonical_tags_round_trip_through_display() {
        for kind in ProviderKind::ALL {
            let parsed: ProviderKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_aliases_are_case_insensitive() {
        let cases = [
            ("OpenAI", ProviderKind::OpenAI),
            ("openai-style", ProviderKind::OpenAI),
            ("Anthropic", ProviderKind::Claude),
            ("anthropic-style", ProviderKind::Claude),
            ("local-inference", ProviderKind::Ollama),
            ("FAST-INFERENCE", ProviderKind::Groq),
        ];
        for (tag, expected) in cases {
            assert_eq!(tag.parse::<ProviderKind>().unwrap(), expected, "tag {tag}");
        }
    }

    #[test]
    fn test_unknown_tag_is_unsupported() {
        let error = "gemini".parse::<ProviderKind>().unwrap_err();
        assert!(matches!(error, LlmError::UnsupportedProvider { ref provider } if provider == "gemini"));
    }
}

#[cfg(test)]
mod get_provider_tests {
    use super::*;

    #[test]
    fn test_builds_matching_adapter_for_each_tag() {
        let cases = [
            ("openai", "openai"),
            ("claude", "claude"),
            ("anthropic", "claude"),
            ("ollama", "ollama"),
            ("groq", "groq"),
        ];
        for (tag, expected_name) in cases {
            let config = provider_config("Test", tag, "");
            let provider = get_provider(tag, &config).unwrap();
            assert_eq!(provider.provider_name(), expected_name);
        }
    }

    #[test]
    fn test_same_config_gives_identical_endpoints() {
        let config = provider_config("Test", "groq", "");

        let first = get_provider("groq", &config).unwrap();
        let second = get_provider("groq", &config).unwrap();

        assert_eq!(first.default_endpoint(), second.default_endpoint());
    }

    #[test]
    fn test_unknown_type_is_unsupported() {
        let config = provider_config("Test", "mistral", "");
        let error = get_provider("mistral", &config).unwrap_err();
        assert!(matches!(error, LlmError::UnsupportedProvider { .. }));
    }

    #[test]
    fn test_registry_does_not_mutate_config() {
        let config = provider_config("Test", "openai", "https://example.com/v1/");
        let before = config.clone();

        let _provider = get_provider("openai", &config).unwrap();

        assert_eq!(config, before);
    }
}

#[cfg(test)]
mod default_endpoint_tests {
    use super::*;

    #[test]
    fn test_known_endpoints() {
        assert_eq!(default_endpoint("openai").unwrap(), "https://api.openai.com/v1");
        assert_eq!(default_endpoint("claude").unwrap(), "https://api.anthropic.com");
        assert_eq!(default_endpoint("ollama").unwrap(), "http://localhost:11434");
        assert_eq!(default_endpoint("groq").unwrap(), "https://api.groq.com/openai/v1");
    }

    #[test]
    fn test_unknown_endpoint() {
        assert!(matches!(
            default_endpoint("bard"),
            Err(LlmError::UnsupportedProvider { .. })
        ));
    }
}
