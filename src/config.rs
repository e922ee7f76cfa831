//! Provider configuration resolved once at startup.
//!
//! Values come from environment variables, falling back to the `env` map in
//! `$HOME/.wayfarer/settings.json` (see [`crate::utils::settings`]).

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::error::{ItineraryError, Result};
use crate::utils::Settings;

/// Environment variable selecting the provider.
pub const PROVIDER_VAR: &str = "AI_PROVIDER";
/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "AI_API_KEY";
/// Environment variable holding the model identifier.
pub const MODEL_VAR: &str = "AI_MODEL";
/// Environment variable overriding the provider endpoint.
pub const BASE_URL_VAR: &str = "AI_BASE_URL";
/// Environment variable selecting the failure policy.
pub const FAILURE_POLICY_VAR: &str = "AI_FAILURE_POLICY";
/// Environment variable setting the transport timeout in seconds.
pub const TIMEOUT_VAR: &str = "AI_REQUEST_TIMEOUT_SECS";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Supported generative-AI providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Provider {
    /// OpenAI chat completions.
    #[default]
    OpenAi,
    /// Anthropic messages API.
    Anthropic,
    /// Google Generative Language API.
    Google,
    /// Any endpoint accepting `{model, prompt, max_tokens}`.
    Custom,
}

impl Provider {
    /// Returns the configuration name of the provider.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Google => "google",
            Provider::Custom => "custom",
        }
    }

    /// Provider-specific variables consulted when `AI_API_KEY` is unset.
    fn fallback_key_vars(self) -> &'static [&'static str] {
        match self {
            Provider::OpenAi => &["OPENAI_API_KEY"],
            Provider::Anthropic => &["ANTHROPIC_API_KEY", "CLAUDE_API_KEY"],
            Provider::Google => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
            Provider::Custom => &[],
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ItineraryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "anthropic" => Ok(Provider::Anthropic),
            "google" => Ok(Provider::Google),
            "custom" => Ok(Provider::Custom),
            _ => Err(ItineraryError::UnsupportedProvider(s.to_string())),
        }
    }
}

/// How generation failures are reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Return typed errors for missing credentials and provider failures.
    #[default]
    Strict,
    /// Log a warning and return the sample itinerary instead.
    Fallback,
}

impl FailurePolicy {
    /// Returns the configuration name of the policy.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FailurePolicy::Strict => "strict",
            FailurePolicy::Fallback => "fallback",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailurePolicy {
    type Err = ItineraryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(FailurePolicy::Strict),
            "fallback" | "sample" => Ok(FailurePolicy::Fallback),
            other => Err(ItineraryError::Configuration(format!(
                "unknown failure policy '{other}' (expected strict or fallback)"
            ))),
        }
    }
}

/// Immutable provider settings for the lifetime of the process.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    provider: Provider,
    api_key: String,
    model: String,
    base_url: Option<String>,
    failure_policy: FailurePolicy,
    request_timeout: Option<Duration>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.redacted_api_key())
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("failure_policy", &self.failure_policy)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ProviderConfig {
    /// Creates a configuration with the default model and no overrides.
    pub fn new(provider: Provider, api_key: impl Into<String>) -> Self {
        Self {
            provider,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            failure_policy: FailurePolicy::default(),
            request_timeout: None,
        }
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the endpoint override.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the failure policy.
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Sets the transport timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Resolves the configuration from the environment and settings file.
    pub fn from_env() -> Result<Self> {
        Self::from_settings(&Settings::load_or_default())
    }

    /// Resolves the configuration from the environment, falling back to
    /// already loaded settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::from_lookup(|key: &str| settings.get_env_var(key))
    }

    /// Resolves the configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let provider = match get(PROVIDER_VAR) {
            Some(name) => name.parse()?,
            None => Provider::default(),
        };

        let api_key = get(API_KEY_VAR)
            .or_else(|| {
                provider
                    .fallback_key_vars()
                    .iter()
                    .find_map(|&key| get(key))
            })
            .unwrap_or_default();

        let mut config = Self::new(provider, api_key)
            .with_model(get(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()));

        if let Some(base_url) = get(BASE_URL_VAR) {
            config = config.with_base_url(base_url);
        }

        if let Some(policy) = get(FAILURE_POLICY_VAR) {
            config = config.with_failure_policy(policy.parse()?);
        }

        if let Some(raw) = get(TIMEOUT_VAR) {
            let secs: u64 = raw.parse().map_err(|_| {
                ItineraryError::Configuration(format!(
                    "{TIMEOUT_VAR} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            config = config.with_request_timeout(Duration::from_secs(secs));
        }

        config.validate()?;
        debug!(config = ?config, "Resolved provider configuration");
        Ok(config)
    }

    /// Checks that the configuration can be used to build a client.
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ItineraryError::Configuration(
                "model must not be empty".to_string(),
            ));
        }

        if self.provider == Provider::Custom && self.base_url.is_none() {
            return Err(ItineraryError::Configuration(format!(
                "the custom provider requires {BASE_URL_VAR} to be set"
            )));
        }

        if let Some(base_url) = &self.base_url {
            Url::parse(base_url).map_err(|e| {
                ItineraryError::Configuration(format!("invalid base URL '{base_url}': {e}"))
            })?;
        }

        if self.request_timeout == Some(Duration::ZERO) {
            return Err(ItineraryError::Configuration(format!(
                "{TIMEOUT_VAR} must be greater than zero"
            )));
        }

        Ok(())
    }

    /// Returns the selected provider.
    #[must_use]
    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Returns the API key, which may be empty.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns true when an API key is configured.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Returns the model identifier.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the endpoint override, if any.
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Returns the failure policy.
    #[must_use]
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Returns the transport timeout, if any.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Returns the API key with all but the last four characters masked.
    #[must_use]
    pub fn redacted_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        match chars.len() {
            0 => "(not set)".to_string(),
            n if n <= 8 => "****".to_string(),
            n => format!("****{}", chars[n - 4..].iter().collect::<String>()),
        }
    }
}
