//! Prompt templates for the itinerary and guideline requests
//!
//! Both prompts are fixed instructions with the caller's fields substituted
//! in. Nothing here validates input; the form layer already did.

use std::fmt::Write;

use crate::llm::ChatMessage;
use crate::models::TravelPreferences;

const ITINERARY_SYSTEM_PROMPT: &str = "\
Context: Assume the user is looking for a personalized travel experience. Consider different aspects like the type of attractions (cultural, adventure, relaxation), preferred accommodation style, dining preferences (local cuisine, fine dining), and budget constraints.
Your Role: Expert Travel Planner
Short basic instruction: Create a detailed travel itinerary based on user preferences.
What you should do: Develop a day-by-day travel itinerary that includes activities, attractions, dining, and accommodations. Use the format where each day has a title and a brief summary of activities for each day in about 100 words. Provide recommendations that fit the user's interests, budget, and preferences.
Your Goal: Ensure that the generated itinerary is highly customized, thoughtful, and aligns with the user's travel goals. Mention what to eat, where to find those, suggest hotels or accommodation, suggest agencies that might help in activities.
Result: Return a JSON array of maps where the title is the key and the whole day plan is the value

Here is an estimated price range for the treks you listed:

1-Day Treks:
Bandipur to Ramkot Hike: Approximately NPR 3,700-4,900 per person for a guided tour, including transportation from Kathmandu.
Gorkha Durbar Hike: Similar to Bandipur, the cost for a day hike, including transportation, could range from NPR 3,000-5,000.
Chitwan National Park Jungle Walk: Prices vary depending on the package but typically range from NPR 2,000-4,000 per person.
Lumbini Heritage Site Walk: Around NPR 2,500-4,000 per person, depending on guide services and transportation.
2-Day Treks:
Nagarkot to Dhulikhel Hike: Estimated cost is around NPR 8,000-10,000 per person, including accommodation and meals.
Bhaktapur to Panauti Hike: This trek might cost around NPR 7,000-9,000 per person.
Dhulikhel to Namobuddha Hike: Costs are similar, ranging from NPR 7,000-10,000 per person.
Multi-Day Treks:
Everest Base Camp Trek (12-14 days): The cost is typically around $1,000-3,000 USD depending on services included.
Gokyo Lakes Trek (10-12 days): Approximately $1,200-2,500 USD.
Three Passes Trek (17-21 days): Estimated at $1,500-3,500 USD.
Annapurna Base Camp Trek (7-10 days): Around $800-1,500 USD.
Annapurna Circuit Trek (14-21 days): Estimated between $1,000-2,500 USD.
Mardi Himal Trek (5-7 days): Costs around $500-1,000 USD.
Langtang Valley Trek (5-7 days): Estimated at $500-1,200 USD.
Gosaikunda Trek (6-8 days): Around $600-1,300 USD.
Helambu Trek (5-7 days): Estimated at $500-1,000 USD.
Manaslu Circuit Trek (12-14 days): Costs range from $1,200-2,500 USD.
Tsum Valley Trek (10-12 days): Around $1,200-2,000 USD.
Upper Mustang Trek (10-14 days): Costs between $1,500-3,000 USD.
Lower Mustang Trek (5-7 days): Estimated at $700-1,500 USD.
Upper Dolpo Trek (18-21 days): Costs range from $2,500-4,500 USD.
Lower Dolpo Trek (10-12 days): Estimated at $1,500-3,000 USD.
Kanchenjunga Base Camp Trek (18-21 days): Around $2,500-4,000 USD.
Kanchenjunga North Base Camp Trek (15-18 days): Similar costs, around $2,000-3,500 USD.
Rara Lake Trek (7-10 days): Approximately $800-1,500 USD.

Average cost of hotel in Nepal is about Rs 2500 per night

Average cost of special activities:
White Water Rafting: Costs range from $50-$150 per person, depending on the river and duration.
Paragliding in Pokhara: Around $80-$120 per person for a 30-minute flight.
Jungle Safari in Chitwan National Park: Approximately $100-$150 per person for a full-day experience.
Mountain Flights: Costs range from $200-$300 per person for a scenic flight over the Himalayas.
Bungee Jumping: Approximately $80-$120 per jump.
Helicopter Tour: Costs vary significantly based on the destination. For example, an Everest Base Camp helicopter tour can range from $1,200-$2,500 per person, while other destinations like Annapurna or Langtang can be slightly lower.
";

const GUIDELINE_SYSTEM_PROMPT: &str = "\
You are a travel guide for Nepal. Provide comprehensive advice to tourists on the following format:

Basic Guidelines and Practices:
  It should be an array of strings called Basic Guidelines.
  Describe local customs, cultural practices, and etiquette.
  Include tips on appropriate dress and behavior in public and religious places.

Emergency Contacts:
  It should be a dictionary called Emergency Contacts where the key is the organization and the value is the contact number.
  Provide contact information for local police, medical facilities, tourist assistance, and embassies or consulates.

Ensure the advice is clear, relevant, and useful for tourists planning their visit to Nepal. Give the advice in the form of a JSON object.
";

/// System and human messages asking for a day-by-day itinerary
#[must_use]
pub fn itinerary_messages(prefs: &TravelPreferences) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(ITINERARY_SYSTEM_PROMPT),
        ChatMessage::user(itinerary_request(prefs)),
    ]
}

/// System and human messages asking for guidelines tailored to `country`
#[must_use]
pub fn guideline_messages(country: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(GUIDELINE_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "I am from {country}. What should I be mindful of when I am travelling to nepal"
        )),
    ]
}

fn itinerary_request(prefs: &TravelPreferences) -> String {
    let fields: [(&str, String); 16] = [
        ("Full Name", prefs.full_name.clone()),
        ("Country Of Origin", prefs.country_of_origin.clone()),
        ("Occupation", prefs.occupation.clone()),
        ("Main Purpose of Visit", prefs.main_purpose_of_visit.clone()),
        (
            "Travel Budget",
            format!(
                "{} of {}'s currency",
                prefs.travel_budget, prefs.country_of_origin
            ),
        ),
        ("Duration Of Visit", format!("{} days", prefs.duration_of_visit)),
        ("Food Preferences", prefs.food_preferences.join(", ")),
        ("Preferred Attractions", prefs.preferred_attractions.join(", ")),
        (
            "Number of People Traveling",
            prefs.number_of_people_travelling.to_string(),
        ),
        (
            "Special Activities Interested In",
            prefs.special_activities_interested.join(", "),
        ),
        (
            "Transportation Preferences",
            prefs.transportation_preferences.clone(),
        ),
        (
            "Accommodation Preferences",
            prefs.accommodation_preferences.clone(),
        ),
        ("Interested Places", prefs.interested_places.join(", ")),
        ("Weather Preference", prefs.weather_preference.clone()),
        ("Visiting From", prefs.from_month.clone()),
        ("Visiting To", prefs.to_month.clone()),
    ];

    let mut request = String::from("**My Preferences:**\n\n");
    for (label, value) in &fields {
        let _ = writeln!(request, "- **{label}:** {value}");
    }
    request.push_str(
        "\nMake sure the activities and recommendations are suited to my preferences and budget.",
    );
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    fn preferences() -> TravelPreferences {
        TravelPreferences {
            full_name: "Sohil Ansari".to_string(),
            country_of_origin: "Russia".to_string(),
            occupation: "Data Engineer".to_string(),
            main_purpose_of_visit: "explore".to_string(),
            travel_budget: 5000,
            duration_of_visit: 30,
            food_preferences: vec!["Healthy".to_string(), "Momo".to_string()],
            preferred_attractions: vec!["Temples".to_string()],
            number_of_people_travelling: 2,
            special_activities_interested: vec!["Rafting".to_string()],
            transportation_preferences: "Tourist bus".to_string(),
            accommodation_preferences: "In budget".to_string(),
            interested_places: vec!["Pokhara".to_string()],
            weather_preference: "Dry".to_string(),
            from_month: "November".to_string(),
            to_month: "December".to_string(),
        }
    }

    #[test]
    fn test_itinerary_messages_roles() {
        let messages = itinerary_messages(&preferences());
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
    }

    #[test]
    fn test_itinerary_system_prompt_carries_price_tables() {
        let messages = itinerary_messages(&preferences());
        let system = &messages[0].content;
        assert!(system.contains("Expert Travel Planner"));
        assert!(system.contains("Return a JSON array of maps"));
        assert!(system.contains("Everest Base Camp Trek (12-14 days)"));
        assert!(system.contains("Rs 2500 per night"));
        assert!(system.contains("Paragliding in Pokhara"));
    }

    #[test]
    fn test_itinerary_request_restates_every_field() {
        let messages = itinerary_messages(&preferences());
        let human = &messages[1].content;
        assert!(human.starts_with("**My Preferences:**"));
        assert!(human.contains("- **Full Name:** Sohil Ansari"));
        assert!(human.contains("- **Travel Budget:** 5000 of Russia's currency"));
        assert!(human.contains("- **Duration Of Visit:** 30 days"));
        assert!(human.contains("- **Food Preferences:** Healthy, Momo"));
        assert!(human.contains("- **Number of People Traveling:** 2"));
        assert!(human.contains("- **Transportation Preferences:** Tourist bus"));
        assert!(human.contains("- **Visiting From:** November"));
        assert!(human.contains("- **Visiting To:** December"));
        assert!(human.ends_with("suited to my preferences and budget."));
    }

    #[test]
    fn test_itinerary_messages_are_deterministic() {
        assert_eq!(
            itinerary_messages(&preferences()),
            itinerary_messages(&preferences())
        );
    }

    #[test]
    fn test_guideline_messages_name_country() {
        let messages = guideline_messages("Japan");
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("Basic Guidelines"));
        assert!(messages[0].content.contains("Emergency Contacts"));
        assert_eq!(
            messages[1].content,
            "I am from Japan. What should I be mindful of when I am travelling to nepal"
        );
    }
}
