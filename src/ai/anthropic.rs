//! Anthropic messages API client.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{AiClient, AiClientMetadata, MAX_TOKENS};
use crate::itinerary::prompts::inline_system_prompt;

/// Anthropic messages endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";

/// Value sent in the `anthropic-version` header.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic API request message.
#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

/// Anthropic API request body.
#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

/// Anthropic API response content.
#[derive(Deserialize)]
struct Content {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: Option<String>,
}

/// Anthropic API response.
#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<Content>,
}

/// Anthropic messages API client.
///
/// The system prompt is inlined ahead of the user prompt in a single user
/// message.
pub struct AnthropicClient {
    /// HTTP client for API requests.
    client: Client,
    /// API key for the `x-api-key` header.
    api_key: String,
    /// Model identifier.
    model: String,
    /// Messages endpoint.
    endpoint: String,
}

impl AnthropicClient {
    /// Creates a client for the Anthropic messages endpoint.
    pub fn new(
        model: String,
        api_key: String,
        timeout: Option<Duration>,
    ) -> crate::error::Result<Self> {
        Ok(Self {
            client: super::build_http_client(timeout)?,
            api_key,
            model,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        })
    }

    /// Sends requests to a different messages URL, such as a local proxy.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn build_request(&self, system_prompt: &str, user_prompt: &str) -> AnthropicRequest {
        AnthropicRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user".to_string(),
                content: inline_system_prompt(system_prompt, user_prompt),
            }],
        }
    }
}

impl AiClient for AnthropicClient {
    fn send_request<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async move {
            debug!(
                system_prompt_len = system_prompt.len(),
                user_prompt_len = user_prompt.len(),
                model = %self.model,
                "Preparing Anthropic API request"
            );

            let request = self.build_request(system_prompt, user_prompt);

            info!(
                url = %self.endpoint,
                model = %self.model,
                max_tokens = MAX_TOKENS,
                "Sending request to Anthropic API"
            );

            let response = self
                .client
                .post(&self.endpoint)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request)
                .send()
                .await
                .map_err(super::network_error)?;

            let response = super::check_error_response(response).await?;
            let anthropic_response: AnthropicResponse = super::read_envelope(response).await?;

            debug!(
                content_count = anthropic_response.content.len(),
                "Received Anthropic API response"
            );

            let result = anthropic_response
                .content
                .into_iter()
                .next()
                .filter(|c| c.content_type == "text")
                .and_then(|c| c.text)
                .ok_or_else(|| super::missing_reply("Anthropic", "content[0].text"));

            super::log_response_success("Anthropic", &result);
            result
        })
    }

    fn get_metadata(&self) -> AiClientMetadata {
        AiClientMetadata {
            provider: "Anthropic".to_string(),
            model: self.model.clone(),
            endpoint: self.endpoint.clone(),
        }
    }
}
