//! Deterministic sample itinerary used when no provider result is available.

use crate::itinerary::model::{
    AccommodationKind, ActivityCategory, GeneratedAccommodation, GeneratedActivity,
    ItineraryResult,
};

fn activity(
    name: &str,
    description: &str,
    time: &str,
    duration: &str,
    category: ActivityCategory,
    cost: &str,
    location: &str,
) -> GeneratedActivity {
    GeneratedActivity {
        name: name.to_string(),
        description: Some(description.to_string()),
        time: Some(time.to_string()),
        duration: Some(duration.to_string()),
        category,
        cost: Some(cost.to_string()),
        location: Some(location.to_string()),
        image: None,
        ai_generated: true,
    }
}

fn accommodation(
    name: &str,
    kind: AccommodationKind,
    price_range: &str,
    rating: f64,
    description: &str,
) -> GeneratedAccommodation {
    GeneratedAccommodation {
        name: name.to_string(),
        kind,
        price_range: price_range.to_string(),
        rating: Some(rating),
        description: Some(description.to_string()),
        ai_generated: true,
    }
}

/// Returns the built-in sample itinerary.
///
/// The content is generic so it reads sensibly for any destination, and it
/// is stamped like a live result.
#[must_use]
pub fn sample_itinerary() -> ItineraryResult {
    ItineraryResult {
        activities: vec![
            activity(
                "Old Town Walking Tour",
                "Wander the historic centre and its architecture with a local guide",
                "09:00",
                "2-3 hours",
                ActivityCategory::Sightseeing,
                "Free",
                "Old Town",
            ),
            activity(
                "Market Food Crawl",
                "Taste regional specialities and seasonal produce at the central market",
                "11:30",
                "1-2 hours",
                ActivityCategory::Dining,
                "$20-40",
                "Central Market",
            ),
            activity(
                "History Museum",
                "Learn how the region's heritage and traditions took shape",
                "14:00",
                "2 hours",
                ActivityCategory::Cultural,
                "$15-25",
                "Museum Quarter",
            ),
            activity(
                "Riverside Park Picnic",
                "Slow afternoon among gardens and viewpoints",
                "16:30",
                "1-2 hours",
                ActivityCategory::Outdoor,
                "Free",
                "Riverside Park",
            ),
            activity(
                "Artisan Quarter Shopping",
                "Browse workshops for handmade crafts and souvenirs",
                "10:00",
                "2 hours",
                ActivityCategory::Shopping,
                "Varies",
                "Artisan Quarter",
            ),
            activity(
                "Evening Live Music",
                "Catch a set from local musicians in an intimate venue",
                "20:00",
                "2-3 hours",
                ActivityCategory::Entertainment,
                "$10-30",
                "Entertainment District",
            ),
        ],
        accommodations: vec![
            accommodation(
                "Central Plaza Hotel",
                AccommodationKind::Hotel,
                "$120-180/night",
                4.3,
                "Modern rooms within walking distance of the main sights",
            ),
            accommodation(
                "Family Guesthouse",
                AccommodationKind::Guesthouse,
                "$60-90/night",
                4.1,
                "Family-run stay with home-cooked breakfast",
            ),
            accommodation(
                "Backpackers Hostel",
                AccommodationKind::Hostel,
                "$25-40/night",
                3.9,
                "Social hostel with private and shared rooms",
            ),
        ],
        overview: "A balanced itinerary mixing historic sights, local food, culture and \
                   downtime, with stays to suit a range of budgets."
            .to_string(),
    }
}
