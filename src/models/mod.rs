//! Data models for preferences and planner results

pub mod itinerary;
pub mod preferences;

pub use itinerary::{DayPlan, GuidelineResult, Itinerary, TripPlan};
pub use preferences::{ItineraryForm, TravelPreferences, parse_comma_separated};
