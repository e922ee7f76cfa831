//! # wayfarer
//!
//! AI-assisted travel itinerary generation.
//!
//! `wayfarer` turns travel preferences into a structured itinerary of
//! activities, accommodations and an overview by prompting one of several
//! generative-language providers and validating what comes back.
//!
//! ## Quick Start
//!
//! ```no_run
//! use wayfarer::{ItineraryRequest, ItineraryService, ProviderConfig};
//!
//! # async fn run() -> Result<(), wayfarer::ItineraryError> {
//! let config = ProviderConfig::from_env()?;
//! let service = ItineraryService::from_config(&config)?;
//!
//! let request = ItineraryRequest::new("Lisbon, Portugal").with_interests(["food", "history"]);
//! let itinerary = service.generate_itinerary(&request).await?;
//! println!("{}", itinerary.overview);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod ai;
pub mod cli;
pub mod config;
pub mod error;
pub mod itinerary;
pub mod utils;

pub use crate::cli::Cli;
pub use crate::config::{FailurePolicy, Provider, ProviderConfig};
pub use crate::error::ItineraryError;
pub use crate::itinerary::{ItineraryRequest, ItineraryResult, ItineraryService};

/// The current version of wayfarer.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
