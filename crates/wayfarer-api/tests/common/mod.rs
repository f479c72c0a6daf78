//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;
use wayfarer_api::routes;
use wayfarer_api::state::AppState;
use wayfarer_core::error::TransportError;
use wayfarer_journey::JourneyOrchestrator;
use wayfarer_test_support::{ManualClock, ManualScheduler, ScriptedGenerativeClient};

/// Build the full app router with a scripted backend and a deterministic
/// clock and scheduler. Uses the same route structure as `main.rs`.
pub fn build_test_app(replies: Vec<Result<String, TransportError>>) -> Router {
    let clock = Arc::new(ManualClock::at(
        Utc.with_ymd_and_hms(2026, 5, 20, 6, 0, 0).unwrap(),
    ));
    let scheduler = Arc::new(ManualScheduler::new());
    let client = Arc::new(ScriptedGenerativeClient::new(replies));
    let orchestrator = JourneyOrchestrator::new(clock, scheduler, client);
    let app_state = AppState::new(orchestrator);

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/journey", routes::journey::router())
        .with_state(app_state)
}

/// A well-formed backend reply for one narrative step.
pub fn canned_reply(location: &str, hours: f64) -> String {
    serde_json::json!({
        "currentLocation": location,
        "currentActivity": "Moving along",
        "eventDescription": format!("The journey continues through {location}."),
        "nextEventTime": hours,
    })
    .to_string()
}

/// A complete character profile request body.
pub fn profile_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Noor",
        "description": "A restless mapmaker",
        "departure_location": "Lisbon",
        "destination": "Istanbul",
        "travel_method": "driving",
        "travel_style": "adventure",
    })
}

/// Send a POST request with a JSON body and return the response. A body-less
/// response decodes as JSON null.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}
