//! HTTP plumbing shared by all vendor adapters
//!
//! One request in, one parsed body or one classified [`LlmError`] out.
//! Nothing is retried: a failed call surfaces immediately.

use crate::config::HttpSettings;
use crate::error::{LlmError, LlmResult};
use crate::logging::{log_debug, log_error};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Upper bound on raw body text copied into error messages.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Vendor error code/type values that mean "request too large".
const TOO_LARGE_MARKERS: [&str; 2] = ["rate_limit_exceeded", "request_too_large"];

/// Thin wrapper over `reqwest::Client` that tags every failure with the adapter name.
#[derive(Debug, Clone)]
pub(crate) struct ProviderHttpClient {
    client: reqwest::Client,
    provider: &'static str,
}

impl ProviderHttpClient {
    pub(crate) fn new(provider: &'static str, settings: &HttpSettings) -> LlmResult<Self> {
        Ok(Self {
            client: settings.build_client()?,
            provider,
        })
    }

    /// POST a JSON body and decode the JSON response
    pub(crate) async fn post_json<B, R>(
        &self,
        url: &str,
        headers: &HeaderMap,
        body: &B,
    ) -> LlmResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.client.post(url).headers(headers.clone()).json(body);
        self.execute(url, request).await
    }

    /// GET and decode the JSON response
    pub(crate) async fn get_json<R: DeserializeOwned>(
        &self,
        url: &str,
        headers: &HeaderMap,
    ) -> LlmResult<R> {
        let request = self.client.get(url).headers(headers.clone());
        self.execute(url, request).await
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> LlmResult<R> {
        let response = request.send().await.map_err(|e| {
            log_error!(
                provider = self.provider,
                url = %url,
                error = %e,
                "HTTP request failed"
            );
            LlmError::provider_error(
                self.provider,
                e.status().map(|s| s.as_u16()),
                format!("request to {url} failed: {e}"),
                Some(Box::new(e)),
            )
        })?;

        let status = response.status();
        let raw_body = response.text().await.map_err(|e| {
            LlmError::provider_error(
                self.provider,
                Some(status.as_u16()),
                format!("failed to read response body: {e}"),
                Some(Box::new(e)),
            )
        })?;

        if !status.is_success() {
            return Err(classify_error_response(
                self.provider,
                status.as_u16(),
                &raw_body,
            ));
        }

        log_debug!(
            provider = self.provider,
            status = status.as_u16(),
            body_len = raw_body.len(),
            "Received provider response"
        );

        serde_json::from_str(&raw_body).map_err(|e| {
            LlmError::invalid_response_shape(
                self.provider,
                format!("{e}; body: {}", truncate(&raw_body)),
            )
        })
    }
}

/// Error details pulled out of a vendor error body.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct VendorError {
    pub(crate) message: Option<String>,
    pub(crate) code: Option<String>,
    pub(crate) kind: Option<String>,
}

/// Parse the error envelopes used by the supported vendors:
/// `{"error": {"message", "type", "code"}}` (OpenAI, Groq, Anthropic) and
/// `{"error": "text"}` (Ollama).
pub(crate) fn parse_vendor_error(body: &str) -> VendorError {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return VendorError::default();
    };
    let as_string = |v: Option<&Value>| v.and_then(Value::as_str).map(str::to_string);

    match json.get("error") {
        Some(Value::String(message)) => VendorError {
            message: Some(message.clone()),
            ..VendorError::default()
        },
        Some(obj @ Value::Object(_)) => VendorError {
            message: as_string(obj.get("message")),
            code: as_string(obj.get("code")),
            kind: as_string(obj.get("type")),
        },
        _ => VendorError {
            message: as_string(json.get("message")),
            ..VendorError::default()
        },
    }
}

/// Map a non-success response onto the error taxonomy.
///
/// HTTP 413, a `rate_limit_exceeded` code, or a `request_too_large` type all
/// become [`LlmError::ContentTooLarge`]; everything else is a
/// [`LlmError::ProviderError`] carrying the status and vendor message.
pub(crate) fn classify_error_response(provider: &str, status: u16, body: &str) -> LlmError {
    let vendor = parse_vendor_error(body);
    let message = vendor
        .message
        .clone()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("HTTP error! status: {status}")
            } else {
                truncate(body)
            }
        });

    let too_large = status == 413
        || [vendor.code.as_deref(), vendor.kind.as_deref()]
            .into_iter()
            .flatten()
            .any(|marker| TOO_LARGE_MARKERS.contains(&marker));

    if too_large {
        LlmError::content_too_large(provider, Some(status), message)
    } else {
        LlmError::provider_error(provider, Some(status), message, None)
    }
}

/// Header value from configuration text, rejecting bytes HTTP cannot carry.
pub(crate) fn header_value(provider: &str, value: &str) -> LlmResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| {
        LlmError::invalid_configuration(format!("{provider} API key has an invalid format: {e}"))
    })
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_ERROR_BODY_CHARS {
        return text.to_string();
    }
    let mut out: String = text.chars().take(MAX_ERROR_BODY_CHARS).collect();
    out.push_str("...");
    out
}
