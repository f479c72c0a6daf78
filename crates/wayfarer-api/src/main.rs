//! Wayfarer API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use wayfarer_api::error::AppError;
use wayfarer_api::routes;
use wayfarer_api::state::AppState;
use wayfarer_core::time::{SystemClock, TokioScheduler};
use wayfarer_generative::{GenerativeConfig, MessagesApiClient};
use wayfarer_journey::JourneyOrchestrator;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Wayfarer API server");

    // Read configuration from environment.
    let api_key = std::env::var("GENERATIVE_API_KEY").map_err(|_| {
        AppError::Config("GENERATIVE_API_KEY environment variable must be set".into())
    })?;
    let mut generative_config = GenerativeConfig::new(api_key);
    if let Ok(base_url) = std::env::var("GENERATIVE_BASE_URL") {
        generative_config.base_url = base_url;
    }
    if let Ok(model) = std::env::var("GENERATIVE_MODEL") {
        generative_config.model = model;
    }
    if let Ok(timeout_secs) = std::env::var("GENERATIVE_TIMEOUT_SECS") {
        let secs: u64 = timeout_secs.parse().map_err(|e| {
            AppError::Config(format!("GENERATIVE_TIMEOUT_SECS must be a number of seconds: {e}"))
        })?;
        generative_config.timeout = Duration::from_secs(secs);
    }
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;

    // Build the orchestrator and its collaborators.
    let client = MessagesApiClient::new(generative_config)
        .map_err(|e| AppError::Config(format!("building generative client: {e}")))?;
    let orchestrator = JourneyOrchestrator::new(
        Arc::new(SystemClock),
        Arc::new(TokioScheduler),
        Arc::new(client),
    );
    let app_state = AppState::new(orchestrator);

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/journey", routes::journey::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
