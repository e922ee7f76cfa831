//! OpenAI chat-completions client.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{AiClient, AiClientMetadata, MAX_TOKENS};

/// Default chat-completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

const TEMPERATURE: f32 = 0.7;

/// OpenAI API request message.
#[derive(Serialize, Debug)]
struct Message {
    role: String,
    content: String,
}

/// OpenAI API request body.
#[derive(Serialize, Debug)]
struct OpenAiRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

/// OpenAI API response choice.
#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
}

/// OpenAI API response message.
#[derive(Deserialize, Debug)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI API response.
#[derive(Deserialize, Debug)]
struct OpenAiResponse {
    choices: Vec<Choice>,
}

/// OpenAI chat-completions client.
pub struct OpenAiClient {
    /// HTTP client for API requests.
    client: Client,
    /// API key sent as a bearer token.
    api_key: String,
    /// Model identifier.
    model: String,
    /// Full chat-completions URL.
    endpoint: String,
}

impl OpenAiClient {
    /// Creates a client for the default OpenAI endpoint.
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

    /// Sends requests to a different chat-completions URL.
    ///
    /// The URL is used as-is, so it must include the full path.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn build_request(&self, system_prompt: &str, user_prompt: &str) -> OpenAiRequest {
        OpenAiRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

impl AiClient for OpenAiClient {
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
                "Preparing OpenAI API request"
            );

            let request = self.build_request(system_prompt, user_prompt);

            info!(url = %self.endpoint, model = %self.model, "Sending request to OpenAI API");

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
            let openai_response: OpenAiResponse = super::read_envelope(response).await?;

            debug!(
                choice_count = openai_response.choices.len(),
                "Received OpenAI API response"
            );

            let result = openai_response
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .ok_or_else(|| super::missing_reply("OpenAI", "choices[0].message.content"));

            super::log_response_success("OpenAI", &result);
            result
        })
    }

    fn get_metadata(&self) -> AiClientMetadata {
        AiClientMetadata {
            provider: "OpenAI".to_string(),
            model: self.model.clone(),
            endpoint: self.endpoint.clone(),
        }
    }
}
