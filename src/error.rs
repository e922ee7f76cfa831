//! Itinerary generation errors.

use thiserror::Error;

/// Errors raised while configuring or running itinerary generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItineraryError {
    /// No API key is configured for the selected provider.
    #[error("No API key configured for the {provider} provider")]
    MissingCredentials {
        /// Provider that was selected.
        provider: String,
    },

    /// The configured provider name is not one of the supported providers.
    #[error("Unsupported AI provider: {0}")]
    UnsupportedProvider(String),

    /// The provider could not be reached or answered with a non-success status.
    #[error("{}", transport_message(.status, .body))]
    TransportFailure {
        /// HTTP status code, when a response was received.
        status: Option<u16>,
        /// Response body or transport error description.
        body: String,
    },

    /// The provider reply is not valid JSON after fence stripping.
    #[error("AI response is not valid JSON: {0}")]
    MalformedResponse(String),

    /// The reply parsed as JSON but does not have the itinerary shape.
    #[error("AI response has an invalid itinerary shape: {0}")]
    InvalidResponseShape(String),

    /// Provider configuration is incomplete or inconsistent.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The itinerary request violates a precondition.
    #[error("Invalid itinerary request: {0}")]
    InvalidRequest(String),
}

fn transport_message(status: &Option<u16>, body: &str) -> String {
    match *status {
        Some(code) if body.is_empty() => format!("AI provider request failed: HTTP {code}"),
        Some(code) => format!("AI provider request failed: HTTP {code}: {body}"),
        None => format!("AI provider request failed: {body}"),
    }
}

impl ItineraryError {
    /// Returns a short, user-facing suggestion for resolving the error.
    #[must_use]
    pub fn hint(&self) -> &'static str {
        match self {
            ItineraryError::MissingCredentials { .. } => {
                "Configure your API key with the AI_API_KEY environment variable"
            }
            ItineraryError::UnsupportedProvider(_) => {
                "Set AI_PROVIDER to one of: openai, anthropic, google, custom"
            }
            ItineraryError::TransportFailure {
                status: Some(401 | 403),
                ..
            } => "Check that your API key is valid for the selected provider",
            ItineraryError::TransportFailure { status: Some(429), .. } => {
                "The provider is rate limiting requests; try again shortly"
            }
            ItineraryError::TransportFailure { .. } => {
                "Check your network connection and the provider endpoint"
            }
            ItineraryError::MalformedResponse(_) | ItineraryError::InvalidResponseShape(_) => {
                "The AI returned an unusable itinerary; try generating again"
            }
            ItineraryError::Configuration(_) => "Review the AI_* configuration variables",
            ItineraryError::InvalidRequest(_) => "Adjust the trip details and try again",
        }
    }

    /// Checks whether re-invoking generation could plausibly succeed.
    ///
    /// Configuration problems and client-side HTTP errors are permanent;
    /// network failures, server errors, rate limits and unusable replies are
    /// worth another attempt.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            ItineraryError::TransportFailure { status: None, .. } => true,
            ItineraryError::TransportFailure {
                status: Some(code), ..
            } => *code == 429 || *code >= 500,
            ItineraryError::MalformedResponse(_) | ItineraryError::InvalidResponseShape(_) => true,
            _ => false,
        }
    }

    /// Returns a stable machine-readable code for the error kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ItineraryError::MissingCredentials { .. } => "MISSING_CREDENTIALS",
            ItineraryError::UnsupportedProvider(_) => "UNSUPPORTED_PROVIDER",
            ItineraryError::TransportFailure { .. } => "TRANSPORT_FAILURE",
            ItineraryError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            ItineraryError::InvalidResponseShape(_) => "INVALID_RESPONSE_SHAPE",
            ItineraryError::Configuration(_) => "CONFIGURATION_ERROR",
            ItineraryError::InvalidRequest(_) => "INVALID_REQUEST",
        }
    }
}

/// Result alias for itinerary operations.
pub type Result<T> = std::result::Result<T, ItineraryError>;
