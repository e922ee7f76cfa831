//! AI client trait, shared HTTP helpers and provider dispatch.

pub mod anthropic;
pub mod custom;
pub mod google;
pub mod openai;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
pub(crate) mod test_utils;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::config::{Provider, ProviderConfig};
use crate::error::ItineraryError;

pub use anthropic::AnthropicClient;
pub use custom::CustomClient;
pub use google::GoogleClient;
pub use openai::OpenAiClient;

/// Upper bound on reply tokens requested from every provider.
pub(crate) const MAX_TOKENS: u32 = 2000;

/// Metadata about an AI client implementation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AiClientMetadata {
    /// Service provider name.
    pub provider: String,
    /// Model identifier.
    pub model: String,
    /// Endpoint requests are sent to, without credentials.
    pub endpoint: String,
}

/// Trait for AI service clients.
///
/// Implementations perform exactly one HTTP request per call and return the
/// provider's raw reply text. Failures carry an [`ItineraryError`].
pub trait AiClient: Send + Sync {
    /// Sends a request to the AI service and returns the raw response.
    fn send_request<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>>;

    /// Returns metadata about the AI client implementation.
    fn get_metadata(&self) -> AiClientMetadata;
}

/// Builds the provider client selected by the configuration.
pub fn create_client(config: &ProviderConfig) -> crate::error::Result<Box<dyn AiClient>> {
    config.validate()?;

    let model = config.model().to_string();
    let api_key = config.api_key().to_string();
    let timeout = config.request_timeout();

    let client: Box<dyn AiClient> = match config.provider() {
        Provider::OpenAi => {
            let client = OpenAiClient::new(model, api_key, timeout)?;
            match config.base_url() {
                Some(endpoint) => Box::new(client.with_endpoint(endpoint)),
                None => Box::new(client),
            }
        }
        Provider::Anthropic => {
            warn_ignored_base_url(config);
            Box::new(AnthropicClient::new(model, api_key, timeout)?)
        }
        Provider::Google => {
            warn_ignored_base_url(config);
            Box::new(GoogleClient::new(model, api_key, timeout)?)
        }
        Provider::Custom => {
            let endpoint = config.base_url().ok_or_else(|| {
                ItineraryError::Configuration(
                    "the custom provider requires a base URL".to_string(),
                )
            })?;
            Box::new(CustomClient::new(
                model,
                api_key,
                endpoint.to_string(),
                timeout,
            )?)
        }
    };

    let metadata = client.get_metadata();
    info!(
        provider = %metadata.provider,
        model = %metadata.model,
        endpoint = %metadata.endpoint,
        "Initialized AI client"
    );

    Ok(client)
}

fn warn_ignored_base_url(config: &ProviderConfig) {
    if let Some(base_url) = config.base_url() {
        warn!(
            provider = %config.provider(),
            base_url = %base_url,
            "Base URL override is only used by the openai and custom providers; ignoring it"
        );
    }
}

// ── Shared helpers for AI client implementations ────────────────────

/// Builds an HTTP client, applying the transport timeout when configured.
pub(crate) fn build_http_client(timeout: Option<Duration>) -> crate::error::Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(|e| {
        ItineraryError::Configuration(format!("Failed to build HTTP client: {e}"))
    })
}

/// Converts a reqwest failure into a transport error.
///
/// The request URL is dropped from the error since it may carry a query-string
/// API key.
pub(crate) fn network_error(err: reqwest::Error) -> anyhow::Error {
    let err = err.without_url();
    ItineraryError::TransportFailure {
        status: err.status().map(|s| s.as_u16()),
        body: err.to_string(),
    }
    .into()
}

/// Checks an HTTP response for error status.
///
/// On success, returns the response unchanged. On failure, reads the error
/// body and returns an [`ItineraryError::TransportFailure`].
pub(crate) async fn check_error_response(
    response: reqwest::Response,
) -> anyhow::Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_else(|e| {
        tracing::debug!("Failed to read error response body: {}", e.without_url());
        String::new()
    });
    Err(ItineraryError::TransportFailure {
        status: Some(status.as_u16()),
        body,
    }
    .into())
}

/// Reads a successful response body and decodes the provider envelope.
pub(crate) async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> anyhow::Result<T> {
    let status = response.status().as_u16();
    let text = response.text().await.map_err(network_error)?;
    serde_json::from_str(&text).map_err(|e| {
        ItineraryError::TransportFailure {
            status: Some(status),
            body: format!("unexpected response envelope ({e}): {text}"),
        }
        .into()
    })
}

/// Error for a well-formed envelope that lacks the reply text.
pub(crate) fn missing_reply(provider: &str, path: &str) -> anyhow::Error {
    ItineraryError::TransportFailure {
        status: None,
        body: format!("{provider} response did not contain {path}"),
    }
    .into()
}

/// Logs successful text extraction from an AI API response.
pub(crate) fn log_response_success(provider: &str, result: &anyhow::Result<String>) {
    if let Ok(text) = result {
        tracing::debug!(
            response_len = text.len(),
            "Successfully extracted text content from {} API response",
            provider
        );
        tracing::debug!(
            response_content = %text,
            "{} API response content",
            provider
        );
    }
}
