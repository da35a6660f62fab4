//! Plain-text rendering of search results
//!
//! Output is a pure function of the normalized records, so identical
//! results always render to identical text.

use super::types::{PlaceResult, SearchResult};

/// Returned by web search when no category produced a result
pub const NO_RESULTS: &str = "No results found";

/// Returned by local search when the joined place list is empty
pub const NO_LOCAL_RESULTS: &str = "No local results found";

/// Shown for a place whose description lookup has no entry
pub const NO_DESCRIPTION: &str = "No description available";

const NOT_AVAILABLE: &str = "N/A";

/// Render web results as blocks separated by a blank line
pub fn format_web_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return NO_RESULTS.to_string();
    }

    results
        .iter()
        .map(format_web_result)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn format_web_result(result: &SearchResult) -> String {
    let mut block = format!(
        "Title: {}\nDescription: {}\nURL: {}",
        result.title, result.description, result.url
    );
    if let Some(published) = &result.published_at {
        block.push_str("\nPublished: ");
        block.push_str(published);
    }
    block
}

/// Render places as blocks separated by a `---` line
pub fn format_places(places: &[PlaceResult]) -> String {
    if places.is_empty() {
        return NO_LOCAL_RESULTS.to_string();
    }

    places
        .iter()
        .map(format_place)
        .collect::<Vec<_>>()
        .join("\n---\n")
}

fn format_place(place: &PlaceResult) -> String {
    let hours = if place.opening_hours.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        place.opening_hours.join(", ")
    };

    format!(
        "Name: {}\nAddress: {}\nPhone: {}\nRating: {} ({} reviews)\nPrice Range: {}\nHours: {}\nDescription: {}",
        place.name.as_deref().unwrap_or(NOT_AVAILABLE),
        place.address.compose(),
        place.phone.as_deref().unwrap_or(NOT_AVAILABLE),
        place.rating_value.as_deref().unwrap_or(NOT_AVAILABLE),
        place.rating_count.as_deref().unwrap_or("0"),
        place.price_range.as_deref().unwrap_or(NOT_AVAILABLE),
        hours,
        place.description.as_deref().unwrap_or(NO_DESCRIPTION),
    )
}
