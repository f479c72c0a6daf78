//! Routes for the journey context.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use wayfarer_journey::domain::{
    CharacterProfile, JourneyUpdate, POPULAR_DESTINATIONS, Phase, TravelEvent, TravelMethod,
    TravelState, TravelStyle,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /message.
#[derive(Debug, Deserialize)]
pub struct UserMessageRequest {
    /// Directive relayed to the traveler, verbatim.
    pub message: String,
}

/// Response body for GET /events.
#[derive(Debug, Serialize)]
pub struct EventsResponse {
    /// Accepted events, oldest first.
    pub events: Vec<TravelEvent>,
}

/// Response body for GET /phase.
#[derive(Debug, Serialize)]
pub struct PhaseResponse {
    /// Current lifecycle phase.
    pub phase: Phase,
}

/// One selectable travel method or style.
#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    /// Stable identifier used in profiles.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
}

/// Response body for GET /options.
#[derive(Debug, Serialize)]
pub struct JourneyOptions {
    /// Selectable travel methods.
    pub travel_methods: Vec<CatalogEntry>,
    /// Selectable travel styles.
    pub travel_styles: Vec<CatalogEntry>,
    /// Destination suggestions for the setup form.
    pub popular_destinations: Vec<&'static str>,
}

/// POST /start
#[instrument(skip(state, profile), fields(character = %profile.name))]
async fn start_journey(
    State(state): State<AppState>,
    Json(profile): Json<CharacterProfile>,
) -> Result<Json<JourneyUpdate>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "handling start_journey");

    let update = state.orchestrator.start_journey(profile).await?;
    Ok(Json(update))
}

/// POST /message
#[instrument(skip(state, request))]
async fn submit_message(
    State(state): State<AppState>,
    Json(request): Json<UserMessageRequest>,
) -> Result<Json<JourneyUpdate>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "handling submit_message");

    let update = state
        .orchestrator
        .submit_user_message(&request.message)
        .await?;
    Ok(Json(update))
}

/// POST /reset
#[instrument(skip(state))]
async fn reset_journey(State(state): State<AppState>) -> StatusCode {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "handling reset_journey");

    state.orchestrator.reset_all();
    StatusCode::NO_CONTENT
}

/// GET /state
async fn travel_state(State(state): State<AppState>) -> Json<TravelState> {
    Json(state.orchestrator.travel_state())
}

/// GET /events
async fn event_log(State(state): State<AppState>) -> Json<EventsResponse> {
    Json(EventsResponse {
        events: state.orchestrator.events(),
    })
}

/// GET /phase
async fn journey_phase(State(state): State<AppState>) -> Json<PhaseResponse> {
    Json(PhaseResponse {
        phase: state.orchestrator.phase(),
    })
}

/// GET /options
async fn journey_options() -> Json<JourneyOptions> {
    Json(JourneyOptions {
        travel_methods: TravelMethod::ALL
            .into_iter()
            .map(|method| CatalogEntry {
                id: method.id(),
                name: method.name(),
                description: method.description(),
            })
            .collect(),
        travel_styles: TravelStyle::ALL
            .into_iter()
            .map(|style| CatalogEntry {
                id: style.id(),
                name: style.name(),
                description: style.description(),
            })
            .collect(),
        popular_destinations: POPULAR_DESTINATIONS.to_vec(),
    })
}

/// Returns the router for the journey context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/start", post(start_journey))
        .route("/message", post(submit_message))
        .route("/reset", post(reset_journey))
        .route("/state", get(travel_state))
        .route("/events", get(event_log))
        .route("/phase", get(journey_phase))
        .route("/options", get(journey_options))
}
