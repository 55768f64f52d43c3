use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::{error, warn};

use crate::models::ItineraryForm;
use crate::planner::TripPlanner;
use crate::{ItineraryError, render};

const INDEX_PAGE: &str = include_str!("../templates/index.html");
const CREATE_ITINERARY_PAGE: &str = include_str!("../templates/create-itinerary.html");

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<TripPlanner>,
}

pub async fn home() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

pub async fn create_itinerary() -> Html<&'static str> {
    Html(CREATE_ITINERARY_PAGE)
}

pub async fn show_itinerary(
    State(state): State<AppState>,
    Query(form): Query<ItineraryForm>,
) -> Result<Html<String>, ItineraryError> {
    let prefs = form.into_preferences()?;
    let plan = state.planner.plan(&prefs).await?;
    Ok(Html(render::itinerary_page(&prefs, &plan)))
}

impl IntoResponse for ItineraryError {
    fn into_response(self) -> Response {
        let (status, heading) = match &self {
            ItineraryError::Validation { .. } => (StatusCode::BAD_REQUEST, "Invalid input"),
            ItineraryError::Api { .. } => (StatusCode::BAD_GATEWAY, "Service unavailable"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong"),
        };

        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected: {}", self);
        }

        (status, Html(render::error_page(heading, &self.user_message()))).into_response()
    }
}
