//! Itinerary requests, generated records and the generation service.

pub mod model;
pub mod prompts;
pub mod request;
pub mod response;
pub mod sample;
pub mod service;

pub use model::{
    AccommodationKind, ActivityCategory, GeneratedAccommodation, GeneratedActivity,
    ItineraryResult,
};
pub use request::ItineraryRequest;
pub use response::{parse_itinerary, strip_code_fence};
pub use sample::sample_itinerary;
pub use service::ItineraryService;
