//! Prompt templates for itinerary generation.

use crate::itinerary::model::{AccommodationKind, ActivityCategory};
use crate::itinerary::request::ItineraryRequest;

/// System prompt sent ahead of every itinerary request.
pub const SYSTEM_PROMPT: &str = "You are an expert travel planner who designs detailed, \
realistic itineraries. Respond with valid JSON only, exactly matching the requested format, \
with no commentary before or after it.";

const NO_BUDGET: &str = "No preference";
const NO_INTERESTS: &str = "General tourism";
const FLEXIBLE: &str = "Flexible";

/// Builds the user prompt describing the trip and the expected JSON reply.
#[must_use]
pub fn generate_user_prompt(request: &ItineraryRequest) -> String {
    let days = request.trip_days();
    let destination = request.destination.trim();
    let budget = request
        .budget
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .unwrap_or(NO_BUDGET);
    let interests = interests_phrase(&request.interests);
    let arrival = request
        .arrival_date
        .map_or_else(|| FLEXIBLE.to_string(), |d| d.to_string());
    let departure = request
        .departure_date
        .map_or_else(|| FLEXIBLE.to_string(), |d| d.to_string());

    format!(
        "Create a detailed travel itinerary for {destination} covering {days} days.\n\
         \n\
         Trip details:\n\
         - Destination: {destination}\n\
         - Duration: {days} days\n\
         - Travelers: {travelers}\n\
         - Budget: {budget}\n\
         - Interests: {interests}\n\
         - Arrival: {arrival}\n\
         - Departure: {departure}\n\
         \n\
         Return ONLY a JSON object with exactly this structure:\n\
         {schema}\n\
         \n\
         Include {activity_count} activities and 3-4 accommodation options. \
         Favour authentic local experiences that match the interests and budget above.",
        travelers = request.traveler_count(),
        schema = response_schema(),
        activity_count = request.target_activity_count(),
    )
}

/// Prepends the system prompt to the user prompt for providers that take a
/// single prompt string.
#[must_use]
pub fn inline_system_prompt(system_prompt: &str, user_prompt: &str) -> String {
    if system_prompt.is_empty() {
        return user_prompt.to_string();
    }
    format!("{system_prompt}\n\n{user_prompt}")
}

/// Joins interests into a human-readable list.
fn interests_phrase(interests: &[String]) -> String {
    let cleaned: Vec<&str> = interests
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .collect();

    if cleaned.is_empty() {
        NO_INTERESTS.to_string()
    } else {
        cleaned.join(", ")
    }
}

fn response_schema() -> String {
    let categories: Vec<&str> = ActivityCategory::ALL.iter().map(|c| c.as_str()).collect();
    let kinds: Vec<&str> = AccommodationKind::ALL.iter().map(|k| k.as_str()).collect();

    format!(
        r#"{{
  "activities": [
    {{
      "name": "Activity name",
      "description": "Detailed description",
      "time": "HH:MM",
      "duration": "X hours",
      "category": "{categories}",
      "cost": "Price range or 'Free'",
      "location": "Specific location"
    }}
  ],
  "accommodations": [
    {{
      "name": "Accommodation name",
      "type": "{kinds}",
      "priceRange": "Price per night",
      "rating": 4.5,
      "description": "Brief description"
    }}
  ],
  "overview": "A comprehensive overview of the itinerary"
}}"#,
        categories = categories.join("|"),
        kinds = kinds.join("|"),
    )
}
