//! Planner output: day plans and travel guidelines

use serde::Serialize;
use serde_json::{Map, Value};

/// One entry of the itinerary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayPlan {
    pub title: String,
    pub description: String,
}

/// Day plans in the order the model produced them
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Itinerary {
    pub days: Vec<DayPlan>,
    /// The decoded array exactly as extracted
    pub raw: Vec<Value>,
}

/// Cultural guidance and emergency contacts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GuidelineResult {
    pub guidelines: Vec<String>,
    /// Organisation to contact, in the order the model listed them
    pub emergency_contacts: Vec<(String, String)>,
    /// Entries under any other key, as display text
    pub other: Vec<(String, String)>,
    /// The decoded object exactly as extracted
    pub raw: Map<String, Value>,
}

/// Everything rendered for one request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TripPlan {
    pub itinerary: Itinerary,
    pub guidelines: GuidelineResult,
}

/// Text of a JSON leaf; strings unquoted, everything else compact JSON
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl Itinerary {
    /// Build day plans from an extracted array
    ///
    /// Every key of an object element becomes one day plan, keeping key
    /// order. Elements that are not objects become `Day N` entries.
    #[must_use]
    pub fn from_values(raw: Vec<Value>) -> Self {
        let mut days = Vec::new();
        for (index, element) in raw.iter().enumerate() {
            match element {
                Value::Object(entries) => {
                    days.extend(entries.iter().map(|(title, plan)| DayPlan {
                        title: title.clone(),
                        description: value_text(plan),
                    }));
                }
                other => days.push(DayPlan {
                    title: format!("Day {}", index + 1),
                    description: value_text(other),
                }),
            }
        }
        Self { days, raw }
    }

    /// An empty itinerary means the model output could not be used
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Lowercase letters only, so "Basic_Guidelines" and "basic guidelines" agree
fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn find_field<'a>(
    raw: &'a Map<String, Value>,
    needle: &str,
    skip: Option<&str>,
) -> Option<(&'a str, &'a Value)> {
    raw.iter()
        .filter(|(key, _)| Some(key.as_str()) != skip)
        .find(|(key, _)| normalize_key(key).contains(needle))
        .map(|(key, value)| (key.as_str(), value))
}

/// Readable text for any JSON value; lists joined with "; "
fn display_text(value: &Value) -> String {
    match value {
        Value::Array(items) => items.iter().map(display_text).collect::<Vec<_>>().join("; "),
        Value::Object(entries) => entries
            .iter()
            .map(|(key, value)| format!("{key}: {}", display_text(value)))
            .collect::<Vec<_>>()
            .join("; "),
        other => value_text(other),
    }
}

impl GuidelineResult {
    /// Build guidelines from an extracted object
    ///
    /// The first key mentioning "guideline" supplies the list and the first
    /// other key mentioning "contact" supplies the contacts. Remaining keys
    /// end up in `other`.
    #[must_use]
    pub fn from_map(raw: Map<String, Value>) -> Self {
        let guideline_field = find_field(&raw, "guideline", None);
        let guideline_key = guideline_field.map(|(key, _)| key);
        let contact_field = find_field(&raw, "contact", guideline_key);
        let contact_key = contact_field.map(|(key, _)| key);

        let guidelines = match guideline_field.map(|(_, value)| value) {
            Some(Value::Array(items)) => items.iter().map(value_text).collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => vec![value_text(other)],
        };

        let emergency_contacts = match contact_field.map(|(_, value)| value) {
            Some(Value::Object(contacts)) => contacts
                .iter()
                .map(|(organisation, contact)| (organisation.clone(), value_text(contact)))
                .collect(),
            _ => Vec::new(),
        };

        let other = raw
            .iter()
            .filter(|(key, _)| {
                Some(key.as_str()) != guideline_key && Some(key.as_str()) != contact_key
            })
            .map(|(key, value)| (key.clone(), display_text(value)))
            .collect();

        Self {
            guidelines,
            emergency_contacts,
            other,
            raw,
        }
    }

    /// Whether anything is left to show after the lenient lookup
    #[must_use]
    pub fn has_content(&self) -> bool {
        !(self.guidelines.is_empty() && self.emergency_contacts.is_empty() && self.other.is_empty())
    }

    /// Empty guidelines mean the model output could not be used
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}
