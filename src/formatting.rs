// src/formatting.rs

use crate::core::{AlertResponse, Subscriber};

/// Shown in place of the list when the backend has no subscribers.
pub const EMPTY_LIST_PLACEHOLDER: &str = "No subscribers yet.";

/// Substituted for a missing or empty location.
pub const UNKNOWN_LOCATION: &str = "n/a";

/// Formats one subscriber as a list entry.
pub fn format_subscriber(subscriber: &Subscriber) -> String {
    format!(
        "{} — {}",
        subscriber.phone_number,
        subscriber.known_location().unwrap_or(UNKNOWN_LOCATION)
    )
}

/// Builds the full set of list entries, in the order received.
///
/// An empty input yields the single placeholder entry.
pub fn subscriber_items(subscribers: &[Subscriber]) -> Vec<String> {
    if subscribers.is_empty() {
        return vec![EMPTY_LIST_PLACEHOLDER.to_string()];
    }
    subscribers.iter().map(format_subscriber).collect()
}

/// Pretty-prints an alert response with two-space indentation.
pub fn format_response(response: &AlertResponse) -> String {
    // Serializing a `Value` cannot fail: its map keys are always strings.
    serde_json::to_string_pretty(response).unwrap_or_else(|_| response.to_string())
}
