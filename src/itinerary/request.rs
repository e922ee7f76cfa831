//! Travel preferences for a single generation call.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ItineraryError, Result};

/// Trip length assumed when the request has no complete date range.
pub const DEFAULT_TRIP_DAYS: i64 = 3;

/// Lower bound on the number of activities requested from the provider.
pub const MIN_ACTIVITY_COUNT: usize = 6;

/// Activities requested per day of the trip.
const ACTIVITIES_PER_DAY: usize = 2;

/// Travel preferences used to build a generation prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRequest {
    /// Destination name, e.g. "Lisbon, Portugal".
    pub destination: String,
    /// First day of the trip.
    #[serde(default)]
    pub arrival_date: Option<NaiveDate>,
    /// Last day of the trip.
    #[serde(default)]
    pub departure_date: Option<NaiveDate>,
    /// Free-text budget preference.
    #[serde(default)]
    pub budget: Option<String>,
    /// Number of travelers.
    #[serde(default)]
    pub travelers: Option<u32>,
    /// Interests to favour, e.g. "food" or "architecture".
    #[serde(default)]
    pub interests: Vec<String>,
}

impl ItineraryRequest {
    /// Creates a request for a destination with no other preferences.
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            ..Self::default()
        }
    }

    /// Sets the arrival and departure dates.
    #[must_use]
    pub fn with_dates(mut self, arrival: NaiveDate, departure: NaiveDate) -> Self {
        self.arrival_date = Some(arrival);
        self.departure_date = Some(departure);
        self
    }

    /// Sets the budget preference.
    #[must_use]
    pub fn with_budget(mut self, budget: impl Into<String>) -> Self {
        self.budget = Some(budget.into());
        self
    }

    /// Sets the number of travelers.
    #[must_use]
    pub fn with_travelers(mut self, travelers: u32) -> Self {
        self.travelers = Some(travelers);
        self
    }

    /// Sets the interests list.
    #[must_use]
    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    /// Checks the request preconditions.
    pub fn validate(&self) -> Result<()> {
        if self.destination.trim().is_empty() {
            return Err(ItineraryError::InvalidRequest(
                "destination must not be empty".to_string(),
            ));
        }

        if self.travelers == Some(0) {
            return Err(ItineraryError::InvalidRequest(
                "travelers must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns the trip length in whole days.
    ///
    /// Uses the date range when both ends are known, otherwise
    /// [`DEFAULT_TRIP_DAYS`]. Date order is not checked.
    #[must_use]
    pub fn trip_days(&self) -> i64 {
        match (self.arrival_date, self.departure_date) {
            // Same-day and reversed ranges are planned as a single day.
            (Some(arrival), Some(departure)) => (departure - arrival).num_days().max(1),
            _ => DEFAULT_TRIP_DAYS,
        }
    }

    /// Returns the number of activities to ask the provider for.
    #[must_use]
    pub fn target_activity_count(&self) -> usize {
        let days = usize::try_from(self.trip_days()).unwrap_or(1);
        MIN_ACTIVITY_COUNT.max(days.saturating_mul(ACTIVITIES_PER_DAY))
    }

    /// Returns the number of travelers, defaulting to one.
    #[must_use]
    pub fn traveler_count(&self) -> u32 {
        self.travelers.unwrap_or(1)
    }
}
