//! Terminal rendering of itineraries.

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::itinerary::{GeneratedAccommodation, GeneratedActivity, ItineraryResult};

/// Output format for rendered itineraries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON with camelCase fields.
    Json,
}

/// Renders an itinerary in the requested format.
pub fn render(result: &ItineraryResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(result)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(result).context("Failed to serialize itinerary")
        }
    }
}

/// Renders an itinerary as plain text.
pub fn render_text(result: &ItineraryResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n\n", result.overview));
    out.push_str(&format!("Activities ({}):\n", result.activities.len()));
    for activity in &result.activities {
        push_activity(&mut out, activity);
    }

    out.push_str(&format!(
        "\nAccommodations ({}):\n",
        result.accommodations.len()
    ));
    for accommodation in &result.accommodations {
        push_accommodation(&mut out, accommodation);
    }

    out
}

fn push_activity(out: &mut String, activity: &GeneratedActivity) {
    let time = activity.time.as_deref().unwrap_or("--:--");
    out.push_str(&format!("  {time}  {} [{}]", activity.name, activity.category));
    if let Some(duration) = &activity.duration {
        out.push_str(&format!(", {duration}"));
    }
    if let Some(cost) = &activity.cost {
        out.push_str(&format!(", {cost}"));
    }
    out.push('\n');

    if let Some(location) = &activity.location {
        out.push_str(&format!("         @ {location}\n"));
    }
    if let Some(description) = &activity.description {
        out.push_str(&format!("         {description}\n"));
    }
}

fn push_accommodation(out: &mut String, accommodation: &GeneratedAccommodation) {
    out.push_str(&format!(
        "  {} ({}), {}",
        accommodation.name, accommodation.kind, accommodation.price_range
    ));
    if let Some(rating) = accommodation.rating {
        out.push_str(&format!(", rated {rating:.1}/5"));
    }
    out.push('\n');

    if let Some(description) = &accommodation.description {
        out.push_str(&format!("      {description}\n"));
    }
}
