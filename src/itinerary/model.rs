//! Generated itinerary records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of activity suggested for a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    /// Landmarks, viewpoints and walking tours.
    Sightseeing,
    /// Restaurants, markets and food tours.
    Dining,
    /// Shows, nightlife and events.
    Entertainment,
    /// Markets, boutiques and souvenirs.
    Shopping,
    /// Hikes, beaches and parks.
    Outdoor,
    /// Museums, heritage sites and local traditions.
    Cultural,
    /// Spas, cafés and slow time.
    Relaxation,
}

impl ActivityCategory {
    /// Every category, in prompt order.
    pub const ALL: [ActivityCategory; 7] = [
        ActivityCategory::Sightseeing,
        ActivityCategory::Dining,
        ActivityCategory::Entertainment,
        ActivityCategory::Shopping,
        ActivityCategory::Outdoor,
        ActivityCategory::Cultural,
        ActivityCategory::Relaxation,
    ];

    /// Returns the wire name of the category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityCategory::Sightseeing => "sightseeing",
            ActivityCategory::Dining => "dining",
            ActivityCategory::Entertainment => "entertainment",
            ActivityCategory::Shopping => "shopping",
            ActivityCategory::Outdoor => "outdoor",
            ActivityCategory::Cultural => "cultural",
            ActivityCategory::Relaxation => "relaxation",
        }
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of lodging suggested for a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccommodationKind {
    /// Hotel.
    Hotel,
    /// Hostel.
    Hostel,
    /// Short-term rental.
    Airbnb,
    /// Resort.
    Resort,
    /// Guesthouse or bed and breakfast.
    Guesthouse,
    /// Traditional courtyard house.
    Riad,
}

impl AccommodationKind {
    /// Every accommodation kind, in prompt order.
    pub const ALL: [AccommodationKind; 6] = [
        AccommodationKind::Hotel,
        AccommodationKind::Hostel,
        AccommodationKind::Airbnb,
        AccommodationKind::Resort,
        AccommodationKind::Guesthouse,
        AccommodationKind::Riad,
    ];

    /// Returns the wire name of the accommodation kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AccommodationKind::Hotel => "hotel",
            AccommodationKind::Hostel => "hostel",
            AccommodationKind::Airbnb => "airbnb",
            AccommodationKind::Resort => "resort",
            AccommodationKind::Guesthouse => "guesthouse",
            AccommodationKind::Riad => "riad",
        }
    }
}

impl fmt::Display for AccommodationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single suggested activity.
///
/// `ai_generated` is never read from provider output; it is set when the
/// itinerary is assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedActivity {
    /// Activity name.
    pub name: String,
    /// Longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Suggested start time (HH:MM).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Free-text duration, e.g. "2 hours".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Activity category.
    pub category: ActivityCategory,
    /// Free-text cost, e.g. "Free" or "$20-40".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    /// Where the activity takes place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Illustrative image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Provenance flag.
    #[serde(default, skip_deserializing)]
    pub ai_generated: bool,
}

/// A single suggested place to stay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedAccommodation {
    /// Accommodation name.
    pub name: String,
    /// Accommodation kind.
    #[serde(rename = "type")]
    pub kind: AccommodationKind,
    /// Free-text nightly price range.
    pub price_range: String,
    /// Guest rating from 0 to 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Provenance flag.
    #[serde(default, skip_deserializing)]
    pub ai_generated: bool,
}

/// A complete generated itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryResult {
    /// Suggested activities, in the order the provider listed them.
    pub activities: Vec<GeneratedActivity>,
    /// Suggested accommodations, in the order the provider listed them.
    pub accommodations: Vec<GeneratedAccommodation>,
    /// Summary of the whole itinerary.
    pub overview: String,
}

impl ItineraryResult {
    /// Marks every activity and accommodation as AI generated.
    pub fn stamp_ai_generated(&mut self) {
        for activity in &mut self.activities {
            activity.ai_generated = true;
        }
        for accommodation in &mut self.accommodations {
            accommodation.ai_generated = true;
        }
    }

    /// Returns true when every record carries the provenance flag.
    #[must_use]
    pub fn is_fully_stamped(&self) -> bool {
        self.activities.iter().all(|a| a.ai_generated)
            && self.accommodations.iter().all(|a| a.ai_generated)
    }
}
