//! Google Generative Language API client.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use super::{AiClient, AiClientMetadata};
use crate::error::ItineraryError;
use crate::itinerary::prompts::inline_system_prompt;

/// Base URL of the Generative Language API.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<Part>,
}

/// Google API request body.
#[derive(Serialize)]
struct GoogleRequest {
    contents: Vec<RequestContent>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

/// Google API response.
#[derive(Deserialize)]
struct GoogleResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// Google Generative Language API client.
///
/// The API key travels as the `key` query parameter and is never logged.
pub struct GoogleClient {
    /// HTTP client for API requests.
    client: Client,
    /// API key for the `key` query parameter.
    api_key: String,
    /// Model identifier.
    model: String,
    /// API base URL, without the model path.
    api_base: String,
}

impl GoogleClient {
    /// Creates a client for the public Generative Language API.
    pub fn new(
        model: String,
        api_key: String,
        timeout: Option<Duration>,
    ) -> crate::error::Result<Self> {
        Ok(Self {
            client: super::build_http_client(timeout)?,
            api_key,
            model,
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Sends requests to a different API base, such as a local proxy.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Returns the model-specific endpoint without credentials.
    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }

    /// Returns the endpoint with the API key attached.
    fn request_url(&self) -> crate::error::Result<Url> {
        let endpoint = self.endpoint();
        let mut url = Url::parse(&endpoint).map_err(|e| {
            ItineraryError::Configuration(format!("invalid Google endpoint '{endpoint}': {e}"))
        })?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    fn build_request(&self, system_prompt: &str, user_prompt: &str) -> GoogleRequest {
        GoogleRequest {
            contents: vec![RequestContent {
                parts: vec![Part {
                    text: inline_system_prompt(system_prompt, user_prompt),
                }],
            }],
        }
    }
}

impl AiClient for GoogleClient {
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
                "Preparing Google API request"
            );

            let request = self.build_request(system_prompt, user_prompt);
            let url = self.request_url()?;

            info!(url = %self.endpoint(), model = %self.model, "Sending request to Google API");

            let response = self
                .client
                .post(url)
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await
                .map_err(super::network_error)?;

            let response = super::check_error_response(response).await?;
            let google_response: GoogleResponse = super::read_envelope(response).await?;

            debug!(
                candidate_count = google_response.candidates.len(),
                "Received Google API response"
            );

            let result = google_response
                .candidates
                .into_iter()
                .next()
                .and_then(|c| c.content)
                .and_then(|content| content.parts.into_iter().next())
                .and_then(|part| part.text)
                .ok_or_else(|| {
                    super::missing_reply("Google", "candidates[0].content.parts[0].text")
                });

            super::log_response_success("Google", &result);
            result
        })
    }

    fn get_metadata(&self) -> AiClientMetadata {
        AiClientMetadata {
            provider: "Google".to_string(),
            model: self.model.clone(),
            endpoint: self.endpoint(),
        }
    }
}
