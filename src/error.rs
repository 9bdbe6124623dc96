//! Error types for the summarization pipeline.
//!
//! Every failure below the orchestrator is expressed as an [`LlmError`].
//! The orchestrator boundary ([`crate::Summarizer::handle`]) converts it into
//! a single `{error}` response for the extension UI; nothing is retried.
//!
//! # Error Handling Example
//!
//! ```rust
//! use pagesum::{LlmError, error::ErrorCategory};
//!
//! fn describe(err: &LlmError) -> String {
//!     if err.is_content_too_large() {
//!         return err.user_message();
//!     }
//!     match err.category() {
//!         ErrorCategory::Client => format!("Please check your settings: {err}"),
//!         _ => err.user_message(),
//!     }
//! }
//! ```

use crate::logging::{log_error, log_warn};
use thiserror::Error;

// ============================================================================
// Error categorization types
// ============================================================================

/// High-level categorization of errors for routing and handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// External service failures (LLM vendors, network).
    External,

    /// Internal failures (storage collaborator, invariant violations).
    Internal,

    /// Errors the user can fix: missing setup, bad settings, oversized content.
    Client,
}

/// Severity level for logging and alerting decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Action failed but system is stable.
    Error,

    /// Unexpected but recoverable situation.
    Warning,

    /// Expected failure caused by user input or setup.
    Info,
}

// ============================================================================
// LLM Error types
// ============================================================================

/// Convenient result type for pipeline operations.
pub type LlmResult<T> = std::result::Result<T, LlmError>;

/// Errors that can occur while summarizing.
///
/// | Variant | Category | Severity |
/// |---------|----------|----------|
/// | `ConfigurationMissing` | Client | Info |
/// | `UnsupportedProvider` | Client | Error |
/// | `InvalidConfiguration` | Client | Error |
/// | `ProviderError` | External | Error |
/// | `ContentTooLarge` | Client | Warning |
/// | `InvalidResponseShape` | External | Warning |
/// | `Storage` | Internal | Error |
///
/// Use the constructor methods, which log the error at creation:
///
/// ```rust
/// use pagesum::LlmError;
///
/// let err = LlmError::unsupported_provider("gemini");
/// assert!(!err.is_content_too_large());
/// ```
#[derive(Error, Debug)]
pub enum LlmError {
    /// Required stored configuration (provider list, default index, or
    /// language) is absent.
    #[error("{message}")]
    ConfigurationMissing {
        /// Setup instructions for the user.
        message: String,
    },

    /// The provider type tag is not recognized by the registry.
    ///
    /// Supported providers: "openai", "claude", "ollama", "groq"
    #[error("Unsupported LLM provider: {provider}")]
    UnsupportedProvider {
        /// The provider tag that was requested.
        provider: String,
    },

    /// A configuration value is present but unusable.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Description of the configuration problem.
        message: String,
    },

    /// The vendor HTTP call failed.
    ///
    /// `status` is `None` when the request never produced a response
    /// (connection refused, DNS failure, timeout).
    #[error("{provider} request failed{}: {message}", status_suffix(.status))]
    ProviderError {
        /// Adapter that issued the request.
        provider: String,
        /// HTTP status, when a response was received.
        status: Option<u16>,
        /// Vendor message or transport error text.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The vendor rejected the request as too large or over its token rate
    /// limit.
    #[error("{provider} rejected the request as too large (RateLimitExceeded){}: {message}", status_suffix(.status))]
    ContentTooLarge {
        /// Adapter that issued the request.
        provider: String,
        /// HTTP status, when a response was received.
        status: Option<u16>,
        /// Vendor message.
        message: String,
    },

    /// A 2xx response whose body does not match the vendor schema.
    #[error("Invalid {provider} response: {message}")]
    InvalidResponseShape {
        /// Adapter that received the response.
        provider: String,
        /// What was missing or malformed.
        message: String,
    },

    /// The configuration store failed.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage failure.
        message: String,
    },
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|s| format!(" with HTTP {s}"))
        .unwrap_or_default()
}

impl LlmError {
    /// Get the error category for routing and handling decisions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationMissing { .. } => ErrorCategory::Client,
            Self::UnsupportedProvider { .. } => ErrorCategory::Client,
            Self::InvalidConfiguration { .. } => ErrorCategory::Client,
            Self::ProviderError { .. } => ErrorCategory::External,
            Self::ContentTooLarge { .. } => ErrorCategory::Client,
            Self::InvalidResponseShape { .. } => ErrorCategory::External,
            Self::Storage { .. } => ErrorCategory::Internal,
        }
    }

    /// Get the error severity for logging and alerting.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConfigurationMissing { .. } => ErrorSeverity::Info,
            Self::UnsupportedProvider { .. } => ErrorSeverity::Error,
            Self::InvalidConfiguration { .. } => ErrorSeverity::Error,
            Self::ProviderError { .. } => ErrorSeverity::Error,
            Self::ContentTooLarge { .. } => ErrorSeverity::Warning,
            Self::InvalidResponseShape { .. } => ErrorSeverity::Warning,
            Self::Storage { .. } => ErrorSeverity::Error,
        }
    }

    /// Whether the vendor refused the request because of its size.
    pub fn is_content_too_large(&self) -> bool {
        matches!(self, Self::ContentTooLarge { .. })
    }

    /// HTTP status attached to provider failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ProviderError { status, .. } | Self::ContentTooLarge { status, .. } => *status,
            _ => None,
        }
    }

    /// Convert to a message suitable for display in the extension UI.
    ///
    /// Setup errors are surfaced verbatim since they carry instructions.
    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationMissing { message } => message.clone(),
            Self::UnsupportedProvider { provider } => {
                format!("The configured AI provider \"{provider}\" is not supported. Please update it in the options page")
            }
            Self::InvalidConfiguration { message } => {
                format!("AI provider configuration issue: {message}")
            }
            Self::ProviderError {
                status: Some(401 | 403),
                ..
            } => "Authentication failed. Please check your API key".to_string(),
            Self::ProviderError { .. } => {
                "Failed to summarize the content. Please try again later".to_string()
            }
            Self::ContentTooLarge { .. } => {
                "Content is too large to summarize. Please try with a smaller selection or a different model".to_string()
            }
            Self::InvalidResponseShape { .. } => {
                "Received an invalid response from the AI provider".to_string()
            }
            Self::Storage { .. } => "Unable to read extension settings".to_string(),
        }
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    pub fn configuration_missing(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "configuration_missing",
            message = %message,
            "Summarization configuration is incomplete"
        );
        Self::ConfigurationMissing { message }
    }

    pub fn unsupported_provider(provider: impl Into<String>) -> Self {
        let provider = provider.into();
        log_error!(
            provider = %provider,
            error_type = "unsupported_provider",
            "Unsupported LLM provider requested"
        );
        Self::UnsupportedProvider { provider }
    }

    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "invalid_configuration",
            message = %message,
            "LLM configuration validation failed"
        );
        Self::InvalidConfiguration { message }
    }

    pub fn provider_error(
        provider: impl Into<String>,
        status: Option<u16>,
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let provider = provider.into();
        let message = message.into();
        log_error!(
            provider = %provider,
            error_type = "provider_error",
            status = ?status,
            message = %message,
            has_source = source.is_some(),
            "LLM provider request failed"
        );
        Self::ProviderError {
            provider,
            status,
            message,
            source,
        }
    }

    pub fn content_too_large(
        provider: impl Into<String>,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        let provider = provider.into();
        let message = message.into();
        log_warn!(
            provider = %provider,
            error_type = "content_too_large",
            status = ?status,
            message = %message,
            "LLM provider rejected request size"
        );
        Self::ContentTooLarge {
            provider,
            status,
            message,
        }
    }

    pub fn invalid_response_shape(provider: impl Into<String>, message: impl Into<String>) -> Self {
        let provider = provider.into();
        let message = message.into();
        log_warn!(
            provider = %provider,
            error_type = "invalid_response_shape",
            message = %message,
            "LLM response format invalid"
        );
        Self::InvalidResponseShape { provider, message }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "storage",
            message = %message,
            "Configuration store operation failed"
        );
        Self::Storage { message }
    }
}
