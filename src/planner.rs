//! Itinerary and guideline orchestration
//!
//! A plan is two independent model calls made one after the other. Either
//! reply may be unusable, in which case that half of the plan is empty and
//! the other half is unaffected. Transport and provider failures are not
//! absorbed here; they reach the caller.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument, warn};

use crate::Result;
use crate::extract;
use crate::llm::ChatModel;
use crate::models::{GuidelineResult, Itinerary, TravelPreferences, TripPlan};
use crate::prompts;

/// Builds trip plans using a chat model
pub struct TripPlanner {
    model: Arc<dyn ChatModel>,
}

impl TripPlanner {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Ask the model for a day-by-day itinerary
    #[instrument(skip_all, fields(country = %prefs.country_of_origin, days = prefs.duration_of_visit))]
    pub async fn itinerary(&self, prefs: &TravelPreferences) -> Result<Itinerary> {
        let messages = prompts::itinerary_messages(prefs);
        let reply = self.model.complete(&messages).await?;

        let itinerary = Itinerary::from_values(extract::array_or_default(&reply));
        if itinerary.is_empty() {
            warn!("Model reply held no usable itinerary");
        } else {
            info!("Itinerary with {} entries", itinerary.days.len());
        }
        Ok(itinerary)
    }

    /// Ask the model for cultural guidelines and emergency contacts
    #[instrument(skip(self))]
    pub async fn guidelines(&self, country: &str) -> Result<GuidelineResult> {
        let messages = prompts::guideline_messages(country);
        let reply = self.model.complete(&messages).await?;

        let guidelines = GuidelineResult::from_map(extract::object_or_default(&reply));
        if guidelines.is_empty() {
            warn!("Model reply held no usable guidelines");
        } else {
            info!(
                "Guidelines with {} entries and {} contacts",
                guidelines.guidelines.len(),
                guidelines.emergency_contacts.len()
            );
        }
        Ok(guidelines)
    }

    /// Itinerary first, then guidelines for the traveller's country
    #[instrument(skip_all, fields(traveller = %prefs.full_name))]
    pub async fn plan(&self, prefs: &TravelPreferences) -> Result<TripPlan> {
        let start_time = Instant::now();

        let itinerary = self.itinerary(prefs).await?;
        let guidelines = self.guidelines(&prefs.country_of_origin).await?;

        info!(
            "Trip plan ready in {:.3}s",
            start_time.elapsed().as_secs_f64()
        );
        Ok(TripPlan {
            itinerary,
            guidelines,
        })
    }
}
