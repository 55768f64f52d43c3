//! Traveller preferences and the form they are collected from

use serde::{Deserialize, Serialize};

use crate::{ItineraryError, Result};

/// Everything the planner knows about one traveller for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelPreferences {
    pub full_name: String,
    pub country_of_origin: String,
    pub occupation: String,
    pub main_purpose_of_visit: String,
    /// Budget in the currency of `country_of_origin`
    pub travel_budget: u64,
    /// Length of the stay in days
    pub duration_of_visit: u32,
    pub food_preferences: Vec<String>,
    pub preferred_attractions: Vec<String>,
    pub number_of_people_travelling: u32,
    pub special_activities_interested: Vec<String>,
    pub transportation_preferences: String,
    pub accommodation_preferences: String,
    pub interested_places: Vec<String>,
    pub weather_preference: String,
    pub from_month: String,
    pub to_month: String,
}

/// Raw query parameters submitted by the creation form
///
/// List fields arrive as comma separated text and numbers are kept signed so
/// that zero and negative input can be rejected with a readable message.
#[derive(Debug, Clone, Deserialize)]
pub struct ItineraryForm {
    pub first_name: String,
    pub last_name: String,
    pub country_of_origin: String,
    pub occupation: String,
    pub main_purpose_of_visit: String,
    pub travel_budget: i64,
    pub duration_of_visit: i64,
    pub food_preferences: String,
    pub preferred_attractions: String,
    pub number_of_people_travelling: i64,
    pub special_activities_interested: String,
    pub transportation_preferences: String,
    pub accommodation_preferences: String,
    pub interested_places: String,
    pub weather_preference: String,
    pub from_month: String,
    pub to_month: String,
}

/// Split a comma separated value into trimmed, non-empty entries
#[must_use]
pub fn parse_comma_separated(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn require_text(label: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ItineraryError::validation(format!("{label} is required.")));
    }
    Ok(trimmed.to_string())
}

fn require_positive<T: TryFrom<i64>>(label: &str, value: i64) -> Result<T> {
    if value <= 0 {
        return Err(ItineraryError::validation(format!(
            "{label} must be a positive integer."
        )));
    }
    T::try_from(value)
        .map_err(|_| ItineraryError::validation(format!("{label} is too large.")))
}

fn require_list(label: &str, value: &str) -> Result<Vec<String>> {
    let items = parse_comma_separated(value);
    if items.is_empty() {
        return Err(ItineraryError::validation(format!(
            "{label} should not be empty."
        )));
    }
    Ok(items)
}

impl ItineraryForm {
    /// Validate the submitted form and turn it into preferences
    ///
    /// Checks run in form order and the first failure is reported.
    pub fn into_preferences(self) -> Result<TravelPreferences> {
        let first_name = require_text("First Name", &self.first_name)?;
        let last_name = require_text("Last Name", &self.last_name)?;
        let country_of_origin = require_text("Country of Origin", &self.country_of_origin)?;
        let occupation = require_text("Occupation", &self.occupation)?;
        let main_purpose_of_visit =
            require_text("Main Purpose of Visit", &self.main_purpose_of_visit)?;
        let transportation_preferences = require_text(
            "Transportation Preferences",
            &self.transportation_preferences,
        )?;
        let accommodation_preferences =
            require_text("Accommodation Preferences", &self.accommodation_preferences)?;
        let weather_preference = require_text("Weather Preference", &self.weather_preference)?;
        let from_month = require_text("From Month", &self.from_month)?;
        let to_month = require_text("To Month", &self.to_month)?;

        let travel_budget = require_positive("Travel Budget", self.travel_budget)?;
        let duration_of_visit = require_positive("Duration of Visit", self.duration_of_visit)?;
        let number_of_people_travelling = require_positive(
            "Number of People Travelling",
            self.number_of_people_travelling,
        )?;

        let food_preferences = require_list("Food Preferences", &self.food_preferences)?;
        let preferred_attractions =
            require_list("Preferred Attractions", &self.preferred_attractions)?;
        let special_activities_interested = require_list(
            "Special Activities Interested",
            &self.special_activities_interested,
        )?;
        let interested_places = require_list("Interested Places", &self.interested_places)?;

        Ok(TravelPreferences {
            full_name: format!("{first_name} {last_name}"),
            country_of_origin,
            occupation,
            main_purpose_of_visit,
            travel_budget,
            duration_of_visit,
            food_preferences,
            preferred_attractions,
            number_of_people_travelling,
            special_activities_interested,
            transportation_preferences,
            accommodation_preferences,
            interested_places,
            weather_preference,
            from_month,
            to_month,
        })
    }
}
