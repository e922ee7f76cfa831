//! Itinerary generation command.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing::{debug, warn};

use super::render::{render, OutputFormat};
use crate::config::{ProviderConfig, MODEL_VAR, PROVIDER_VAR};
use crate::error::ItineraryError;
use crate::itinerary::{ItineraryRequest, ItineraryResult, ItineraryService};
use crate::utils::Settings;

/// Delay before the first retry; doubles on each further attempt.
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

/// Generates an itinerary for a destination.
#[derive(Parser)]
pub struct GenerateCommand {
    /// Destination, e.g. "Lisbon, Portugal".
    pub destination: String,

    /// Arrival date (YYYY-MM-DD).
    #[arg(long)]
    pub arrival: Option<NaiveDate>,

    /// Departure date (YYYY-MM-DD).
    #[arg(long)]
    pub departure: Option<NaiveDate>,

    /// Budget level or amount, e.g. "budget" or "$2000".
    #[arg(long)]
    pub budget: Option<String>,

    /// Number of travelers.
    #[arg(long)]
    pub travelers: Option<u32>,

    /// Interest to plan around; repeat for several.
    #[arg(long = "interest", value_name = "INTEREST")]
    pub interests: Vec<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Extra attempts after a retryable failure.
    #[arg(long, default_value_t = 0)]
    pub retries: u32,

    /// AI provider (overrides AI_PROVIDER).
    #[arg(long)]
    pub provider: Option<String>,

    /// Model identifier (overrides AI_MODEL).
    #[arg(long)]
    pub model: Option<String>,
}

impl GenerateCommand {
    /// Executes the generate command.
    pub async fn execute(self) -> Result<()> {
        let config = self.resolve_config()?;
        let service = ItineraryService::from_config(&config)
            .context("Failed to set up the itinerary service")?;
        let request = self.build_request();

        eprintln!(
            "🧭 Planning {} with {} ({})...",
            request.destination,
            config.provider(),
            config.model()
        );

        let result = generate_with_retry(&service, &request, self.retries, INITIAL_BACKOFF)
            .await
            .with_context(|| format!("Failed to generate an itinerary for {}", request.destination))?;

        println!("{}", render(&result, self.format)?);
        Ok(())
    }

    /// Resolves the provider configuration, applying command-line overrides.
    fn resolve_config(&self) -> Result<ProviderConfig> {
        let settings = Settings::load_or_default();
        let config = ProviderConfig::from_lookup(|key: &str| match key {
            PROVIDER_VAR if self.provider.is_some() => self.provider.clone(),
            MODEL_VAR if self.model.is_some() => self.model.clone(),
            _ => settings.get_env_var(key),
        })
        .context("Failed to resolve provider configuration")?;
        debug!(config = ?config, "Using provider configuration");
        Ok(config)
    }

    fn build_request(&self) -> ItineraryRequest {
        let mut request =
            ItineraryRequest::new(self.destination.clone()).with_interests(self.interests.clone());
        request.arrival_date = self.arrival;
        request.departure_date = self.departure;
        request.budget = self.budget.clone();
        request.travelers = self.travelers;
        request
    }
}

/// Calls the service, retrying retryable failures with exponential backoff.
///
/// Makes at most `retries + 1` calls.
pub async fn generate_with_retry(
    service: &ItineraryService,
    request: &ItineraryRequest,
    retries: u32,
    initial_backoff: Duration,
) -> std::result::Result<ItineraryResult, ItineraryError> {
    let mut backoff = initial_backoff;
    let mut attempt = 0;

    loop {
        match service.generate_itinerary(request).await {
            Ok(result) => return Ok(result),
            Err(err) if attempt < retries && err.is_retryable() => {
                attempt += 1;
                warn!(
                    error = %err,
                    attempt,
                    retries,
                    backoff_ms = backoff.as_millis() as u64,
                    "Itinerary generation failed; retrying"
                );
                eprintln!("⚠️  {err}; retrying ({attempt}/{retries})...");
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
            Err(err) => return Err(err),
        }
    }
}
