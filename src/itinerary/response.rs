//! Normalization, parsing and validation of provider replies.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::{ItineraryError, Result};
use crate::itinerary::model::ItineraryResult;

const MAX_RATING: f64 = 5.0;

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A```(?i:json)?[ \t]*\r?\n?(.*?)\r?\n?[ \t]*```\z").unwrap()
});

/// Trims the reply and removes an enclosing markdown code fence.
///
/// Only a fence wrapping the whole reply is removed, optionally tagged
/// `json`. Anything else is returned trimmed but otherwise unchanged.
#[must_use]
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    match FENCED_BLOCK.captures(trimmed).and_then(|caps| caps.get(1)) {
        Some(inner) => inner.as_str().trim(),
        None => trimmed,
    }
}

/// Parses and validates a raw provider reply into a stamped itinerary.
pub fn parse_itinerary(raw: &str) -> Result<ItineraryResult> {
    let normalized = strip_code_fence(raw);
    debug!(
        raw_len = raw.len(),
        normalized_len = normalized.len(),
        "Normalized AI response"
    );

    let value: Value = serde_json::from_str(normalized)
        .map_err(|e| ItineraryError::MalformedResponse(e.to_string()))?;

    let mut result: ItineraryResult = serde_path_to_error::deserialize(value).map_err(|e| {
        ItineraryError::InvalidResponseShape(format!("{}: {}", e.path(), e.inner()))
    })?;

    validate_shape(&result)?;
    result.stamp_ai_generated();

    Ok(result)
}

/// Checks the invariants serde cannot express.
pub fn validate_shape(result: &ItineraryResult) -> Result<()> {
    if result.activities.is_empty() {
        return Err(shape_error("activities must not be empty"));
    }
    if result.accommodations.is_empty() {
        return Err(shape_error("accommodations must not be empty"));
    }
    if result.overview.trim().is_empty() {
        return Err(shape_error("overview must not be empty"));
    }

    for (index, activity) in result.activities.iter().enumerate() {
        if activity.name.trim().is_empty() {
            return Err(shape_error(format!("activities[{index}].name must not be empty")));
        }
    }

    for (index, accommodation) in result.accommodations.iter().enumerate() {
        if accommodation.name.trim().is_empty() {
            return Err(shape_error(format!(
                "accommodations[{index}].name must not be empty"
            )));
        }
        if let Some(rating) = accommodation.rating {
            if !(0.0..=MAX_RATING).contains(&rating) {
                return Err(shape_error(format!(
                    "accommodations[{index}].rating {rating} is outside 0-{MAX_RATING}"
                )));
            }
        }
    }

    Ok(())
}

fn shape_error(message: impl Into<String>) -> ItineraryError {
    ItineraryError::InvalidResponseShape(message.into())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::itinerary::model::{AccommodationKind, ActivityCategory};

    const VALID: &str = r#"{
        "activities": [
            {"name": "Tram 28 ride", "category": "sightseeing", "time": "09:00", "aiGenerated": false},
            {"name": "Pastéis tasting", "category": "dining", "cost": "€10"}
        ],
        "accommodations": [
            {"name": "Alfama Rooms", "type": "guesthouse", "priceRange": "€90/night", "rating": 4.6}
        ],
        "overview": "Two relaxed days in Lisbon."
    }"#;

    #[test]
    fn strips_json_tagged_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn strips_untagged_fence() {
        assert_eq!(strip_code_fence("  ```\n{\"a\":1}\n```  \n"), "{\"a\":1}");
    }

    #[test]
    fn strips_single_line_fence() {
        assert_eq!(strip_code_fence("```{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn strips_crlf_fence() {
        assert_eq!(strip_code_fence("```JSON\r\n{\"a\":1}\r\n```"), "{\"a\":1}");
    }

    #[test]
    fn unfenced_text_passes_through() {
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  {\"a\":1}\n"), "{\"a\":1}");
    }

    #[test]
    fn partial_fence_is_left_alone() {
        let text = "Here you go:\n```json\n{}\n```";
        assert_eq!(strip_code_fence(text), text);
    }

    #[test]
    fn parses_and_stamps_valid_reply() {
        let result = parse_itinerary(VALID).unwrap();
        assert_eq!(result.activities.len(), 2);
        assert_eq!(result.activities[0].category, ActivityCategory::Sightseeing);
        assert_eq!(result.activities[0].time.as_deref(), Some("09:00"));
        assert_eq!(result.accommodations[0].kind, AccommodationKind::Guesthouse);
        assert_eq!(result.overview, "Two relaxed days in Lisbon.");
        assert!(result.is_fully_stamped());
    }

    #[test]
    fn parses_fenced_reply() {
        let fenced = format!("```json\n{VALID}\n```");
        let result = parse_itinerary(&fenced).unwrap();
        assert_eq!(result.accommodations.len(), 1);
    }

    #[test]
    fn non_json_is_malformed() {
        let err = parse_itinerary("not json").unwrap_err();
        assert!(matches!(err, ItineraryError::MalformedResponse(_)));
    }

    #[test]
    fn empty_activities_is_invalid_shape() {
        let err = parse_itinerary(
            r#"{"activities": [], "accommodations": [{"name":"A","type":"hotel","priceRange":"$1"}], "overview": "x"}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ItineraryError::InvalidResponseShape("activities must not be empty".to_string())
        );
    }

    #[test]
    fn empty_accommodations_is_invalid_shape() {
        let err = parse_itinerary(
            r#"{"activities": [{"name":"A","category":"dining"}], "accommodations": [], "overview": "x"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("accommodations must not be empty"));
    }

    #[test]
    fn blank_overview_is_invalid_shape() {
        let err = parse_itinerary(
            r#"{"activities": [{"name":"A","category":"dining"}], "accommodations": [{"name":"B","type":"hotel","priceRange":"$1"}], "overview": "  "}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("overview must not be empty"));
    }

    #[test]
    fn missing_overview_is_invalid_shape() {
        let err = parse_itinerary(
            r#"{"activities": [{"name":"A","category":"dining"}], "accommodations": [{"name":"B","type":"hotel","priceRange":"$1"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ItineraryError::InvalidResponseShape(_)));
        assert!(err.to_string().contains("overview"));
    }

    #[test]
    fn wrong_typed_activities_is_invalid_shape() {
        let err = parse_itinerary(
            r#"{"activities": "lots", "accommodations": [{"name":"B","type":"hotel","priceRange":"$1"}], "overview": "x"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ItineraryError::InvalidResponseShape(_)));
    }

    #[test]
    fn unknown_category_reports_path() {
        let err = parse_itinerary(
            r#"{"activities": [{"name":"A","category":"dining"},{"name":"B","category":"skydiving"}], "accommodations": [{"name":"C","type":"hotel","priceRange":"$1"}], "overview": "x"}"#,
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("activities[1].category"), "{message}");
        assert!(message.contains("skydiving"), "{message}");
    }

    #[test]
    fn unknown_accommodation_type_is_invalid_shape() {
        let err = parse_itinerary(
            r#"{"activities": [{"name":"A","category":"dining"}], "accommodations": [{"name":"C","type":"castle","priceRange":"$1"}], "overview": "x"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("accommodations[0].type"));
    }

    #[test]
    fn out_of_range_rating_is_invalid_shape() {
        let err = parse_itinerary(
            r#"{"activities": [{"name":"A","category":"dining"}], "accommodations": [{"name":"C","type":"hotel","priceRange":"$1","rating":7.2}], "overview": "x"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("rating 7.2"));
    }

    #[test]
    fn json_array_is_invalid_shape() {
        let err = parse_itinerary("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ItineraryError::InvalidResponseShape(_)));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn text_without_backticks_is_only_trimmed(text in "[^`]{0,64}") {
                prop_assert_eq!(strip_code_fence(&text), text.trim());
            }

            #[test]
            fn fenced_body_is_recovered(body in "\\{[a-z0-9:\",\\[\\] ]{0,46}\\}") {
                let fenced = format!("```json\n{body}\n```");
                prop_assert_eq!(strip_code_fence(&fenced), body.as_str());
            }
        }
    }
}
