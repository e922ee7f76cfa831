//! Client for self-hosted or third-party completion endpoints.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::{AiClient, AiClientMetadata, MAX_TOKENS};
use crate::itinerary::prompts::inline_system_prompt;

/// Reply fields checked in order for the completion text.
const REPLY_FIELDS: [&str; 3] = ["response", "text", "content"];

/// Custom endpoint request body.
#[derive(Serialize)]
struct CustomRequest {
    model: String,
    prompt: String,
    max_tokens: u32,
}

/// Client for endpoints that accept `{model, prompt, max_tokens}`.
pub struct CustomClient {
    /// HTTP client for API requests.
    client: Client,
    /// API key sent as a bearer token.
    api_key: String,
    /// Model identifier.
    model: String,
    /// Completion URL.
    endpoint: String,
}

impl CustomClient {
    /// Creates a client for the given completion URL.
    pub fn new(
        model: String,
        api_key: String,
        endpoint: String,
        timeout: Option<Duration>,
    ) -> crate::error::Result<Self> {
        Ok(Self {
            client: super::build_http_client(timeout)?,
            api_key,
            model,
            endpoint,
        })
    }

    fn build_request(&self, system_prompt: &str, user_prompt: &str) -> CustomRequest {
        CustomRequest {
            model: self.model.clone(),
            prompt: inline_system_prompt(system_prompt, user_prompt),
            max_tokens: MAX_TOKENS,
        }
    }
}

/// Returns the first non-empty string among the known reply fields.
fn extract_reply(body: &Value) -> Option<String> {
    REPLY_FIELDS.iter().find_map(|field| {
        body.get(field)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    })
}

impl AiClient for CustomClient {
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
                "Preparing custom API request"
            );

            let request = self.build_request(system_prompt, user_prompt);

            info!(url = %self.endpoint, model = %self.model, "Sending request to custom API");

            let response = self
                .client
                .post(&self.endpoint)
                .header("Content-Type", "application/json")
                .header("Authorization", format!("Bearer {}", self.api_key))
                .json(&request)
                .send()
                .await
                .map_err(super::network_error)?;

            let response = super::check_error_response(response).await?;
            let body: Value = super::read_envelope(response).await?;

            let result = extract_reply(&body)
                .ok_or_else(|| super::missing_reply("Custom", "a response, text or content field"));

            super::log_response_success("Custom", &result);
            result
        })
    }

    fn get_metadata(&self) -> AiClientMetadata {
        AiClientMetadata {
            provider: "Custom".to_string(),
            model: self.model.clone(),
            endpoint: self.endpoint.clone(),
        }
    }
}
