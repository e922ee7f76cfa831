//! Itinerary generation service.

use tracing::{debug, info, warn};

use crate::ai::{self, AiClient};
use crate::config::{FailurePolicy, ProviderConfig};
use crate::error::{ItineraryError, Result};
use crate::itinerary::model::ItineraryResult;
use crate::itinerary::prompts::{self, SYSTEM_PROMPT};
use crate::itinerary::request::ItineraryRequest;
use crate::itinerary::response::parse_itinerary;
use crate::itinerary::sample::sample_itinerary;

/// Turns travel preferences into one generated itinerary.
///
/// The service holds only immutable state, so a single instance can serve
/// concurrent callers. It never retries; callers that want resilience
/// re-invoke [`generate_itinerary`](Self::generate_itinerary).
pub struct ItineraryService {
    /// Provider client, absent when no API key is configured.
    client: Option<Box<dyn AiClient>>,
    /// Provider name reported in credential errors.
    provider: String,
    /// How failures are surfaced.
    policy: FailurePolicy,
}

impl ItineraryService {
    /// Creates a service from a resolved provider configuration.
    ///
    /// Configuration problems are reported here, before any request is made.
    /// A missing API key is not an error at this point; it is reported (or
    /// replaced with the sample itinerary) on each generation call.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        config.validate()?;

        let client = if config.has_credentials() {
            Some(ai::create_client(config)?)
        } else {
            debug!(provider = %config.provider(), "No API key configured");
            None
        };

        Ok(Self {
            client,
            provider: config.provider().to_string(),
            policy: config.failure_policy(),
        })
    }

    /// Creates a service around an existing client.
    pub fn with_client(client: Box<dyn AiClient>, policy: FailurePolicy) -> Self {
        let provider = client.get_metadata().provider;
        Self {
            client: Some(client),
            provider,
            policy,
        }
    }

    /// Returns the failure policy in effect.
    #[must_use]
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Returns true when a provider client is available.
    #[must_use]
    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// Generates an itinerary for the request.
    ///
    /// Under [`FailurePolicy::Strict`] every failure is returned as an
    /// [`ItineraryError`]. Under [`FailurePolicy::Fallback`], missing
    /// credentials and provider, parse or shape failures yield the sample
    /// itinerary instead. Invalid requests are rejected under both policies.
    pub async fn generate_itinerary(&self, request: &ItineraryRequest) -> Result<ItineraryResult> {
        request.validate()?;

        let outcome = match &self.client {
            Some(client) => self.generate_live(client.as_ref(), request).await,
            None => Err(ItineraryError::MissingCredentials {
                provider: self.provider.clone(),
            }),
        };

        match (outcome, self.policy) {
            (Ok(result), _) => Ok(result),
            (Err(err), FailurePolicy::Fallback) => {
                warn!(
                    error = %err,
                    code = err.code(),
                    destination = %request.destination,
                    "Itinerary generation failed; using sample itinerary"
                );
                Ok(sample_itinerary())
            }
            (Err(err), FailurePolicy::Strict) => Err(err),
        }
    }

    async fn generate_live(
        &self,
        client: &dyn AiClient,
        request: &ItineraryRequest,
    ) -> Result<ItineraryResult> {
        let user_prompt = prompts::generate_user_prompt(request);

        info!(
            destination = %request.destination,
            days = request.trip_days(),
            target_activities = request.target_activity_count(),
            provider = %self.provider,
            "Generating itinerary"
        );
        debug!(prompt = %user_prompt, "Itinerary prompt");

        let raw = client
            .send_request(SYSTEM_PROMPT, &user_prompt)
            .await
            .map_err(into_itinerary_error)?;

        let result = parse_itinerary(&raw)?;

        info!(
            activities = result.activities.len(),
            accommodations = result.accommodations.len(),
            "Generated itinerary"
        );

        Ok(result)
    }
}

/// Recovers the typed error carried by a client failure.
fn into_itinerary_error(err: anyhow::Error) -> ItineraryError {
    match err.downcast::<ItineraryError>() {
        Ok(typed) => typed,
        Err(other) => ItineraryError::TransportFailure {
            status: None,
            body: format!("{other:#}"),
        },
    }
}
