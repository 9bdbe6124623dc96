//! Provider and HTTP configuration.
//!
//! [`ProviderConfig`] mirrors the shape the extension stores under
//! `llmConfigs`, so values read from the configuration store deserialize
//! directly.

use crate::error::{LlmError, LlmResult};
use crate::logging::log_debug;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Sampling parameters applied to a single summarization request.
///
/// Adapters drop the fields their vendor does not accept. Each field
/// deserializes independently: a missing, null, or non-numeric value (a
/// blank input on the options page) takes its default, and numeric strings
/// are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawAdvancedSettings")]
pub struct AdvancedSettings {
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
}

impl Default for AdvancedSettings {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            temperature: 0.7,
            top_p: 0.9,
            top_k: 5,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAdvancedSettings {
    #[serde(default)]
    max_tokens: Option<Value>,
    #[serde(default)]
    temperature: Option<Value>,
    #[serde(default)]
    top_p: Option<Value>,
    #[serde(default)]
    top_k: Option<Value>,
}

impl From<RawAdvancedSettings> for AdvancedSettings {
    fn from(raw: RawAdvancedSettings) -> Self {
        let defaults = Self::default();
        Self {
            max_tokens: stored_u32(raw.max_tokens.as_ref()).unwrap_or(defaults.max_tokens),
            temperature: stored_f64(raw.temperature.as_ref()).unwrap_or(defaults.temperature),
            top_p: stored_f64(raw.top_p.as_ref()).unwrap_or(defaults.top_p),
            top_k: stored_u32(raw.top_k.as_ref()).unwrap_or(defaults.top_k),
        }
    }
}

fn stored_u32(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn stored_f64(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|v: &f64| v.is_finite())
}

/// `advancedSettings: null` counts as absent.
fn settings_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<AdvancedSettings, D::Error> {
    Ok(Option::<AdvancedSettings>::deserialize(deserializer)?.unwrap_or_default())
}

impl AdvancedSettings {
    /// Validate the ranges accepted by the configuration UI
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::InvalidConfiguration`] if `max_tokens` is zero,
    /// `temperature` is outside `[0, 2]`, or `top_p` is outside `[0, 1]`.
    pub fn validate(&self) -> LlmResult<()> {
        if self.max_tokens == 0 {
            return Err(LlmError::invalid_configuration(
                "maxTokens must be greater than zero",
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(LlmError::invalid_configuration(format!(
                "temperature {} is outside [0, 2]",
                self.temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(LlmError::invalid_configuration(format!(
                "topP {} is outside [0, 1]",
                self.top_p
            )));
        }
        Ok(())
    }
}

/// One user-configured LLM backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Display name shown in the UI and returned as `providerName`
    #[serde(default)]
    pub name: String,
    /// Provider type tag resolved by the registry
    pub provider: String,
    /// May be empty for local backends
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub model: String,
    /// Base URL; empty means the vendor default
    #[serde(default)]
    pub endpoint: String,
    #[serde(default, deserialize_with = "settings_or_default")]
    pub advanced_settings: AdvancedSettings,
}

impl ProviderConfig {
    /// Create a config with default advanced settings and the vendor's default endpoint.
    pub fn new(
        name: impl Into<String>,
        provider: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            provider: provider.into(),
            api_key: api_key.into(),
            model: model.into(),
            endpoint: String::new(),
            advanced_settings: AdvancedSettings::default(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_advanced_settings(mut self, settings: AdvancedSettings) -> Self {
        self.advanced_settings = settings;
        self
    }

    /// Endpoint to address requests to, falling back to `default_endpoint`
    /// when none is configured. Trailing slashes are removed so path
    /// suffixes join cleanly.
    pub fn resolved_endpoint(&self, default_endpoint: &str) -> String {
        let endpoint = self.endpoint.trim();
        let endpoint = if endpoint.is_empty() {
            default_endpoint
        } else {
            endpoint
        };
        endpoint.trim_end_matches('/').to_string()
    }

    /// Validate provider configuration
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::InvalidConfiguration`] if the model is empty or
    /// the advanced settings are out of range.
    pub fn validate(&self) -> LlmResult<()> {
        if self.model.trim().is_empty() {
            return Err(LlmError::invalid_configuration(format!(
                "no model selected for provider \"{}\"",
                self.name
            )));
        }
        self.advanced_settings.validate()
    }
}

/// Timeouts applied to every adapter's HTTP client.
///
/// The pipeline itself never cancels a request; these are the only bound on
/// a hung vendor call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(120),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl HttpSettings {
    pub const REQUEST_TIMEOUT_ENV: &'static str = "PAGESUM_HTTP_TIMEOUT_SECS";
    pub const CONNECT_TIMEOUT_ENV: &'static str = "PAGESUM_CONNECT_TIMEOUT_SECS";

    /// Load timeouts from environment variables, keeping defaults for unset values
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::InvalidConfiguration`] if a variable is set but is
    /// not a positive integer number of seconds.
    pub fn from_env() -> LlmResult<Self> {
        let mut settings = Self::default();
        if let Some(secs) = Self::read_secs(Self::REQUEST_TIMEOUT_ENV)? {
            settings.request_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = Self::read_secs(Self::CONNECT_TIMEOUT_ENV)? {
            settings.connect_timeout = Duration::from_secs(secs);
        }

        log_debug!(
            request_timeout_secs = settings.request_timeout.as_secs(),
            connect_timeout_secs = settings.connect_timeout.as_secs(),
            "HTTP settings loaded from environment"
        );

        Ok(settings)
    }

    fn read_secs(var: &str) -> LlmResult<Option<u64>> {
        let Ok(raw) = std::env::var(var) else {
            return Ok(None);
        };
        match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Some(secs)),
            _ => Err(LlmError::invalid_configuration(format!(
                "{var} must be a positive number of seconds, got \"{raw}\""
            ))),
        }
    }

    /// Build the reqwest client used by an adapter.
    pub(crate) fn build_client(&self) -> LlmResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(|e| {
                LlmError::invalid_configuration(format!("failed to build HTTP client: {e}"))
            })
    }
}
