//! Nepal itinerary planner
//!
//! Turns a traveller's preferences into a day-by-day itinerary and a set of
//! local guidelines by prompting a hosted chat model and scraping the JSON
//! out of its replies.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod llm;
pub mod models;
pub mod planner;
pub mod prompts;
pub mod render;
pub mod telemetry;
pub mod web;

// Re-export core types for public API
pub use crate::config::AppConfig;
pub use error::ItineraryError;
pub use extract::{ExtractionError, array_or_default, extract_array, extract_object, object_or_default};
pub use handlers::AppState;
pub use llm::{AzureChatClient, ChatMessage, ChatModel, Role};
pub use models::{DayPlan, GuidelineResult, Itinerary, TravelPreferences, TripPlan};
pub use planner::TripPlanner;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ItineraryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
