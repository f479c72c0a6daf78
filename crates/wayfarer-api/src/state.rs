//! Shared application state.

use std::sync::Arc;

use wayfarer_journey::JourneyOrchestrator;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The single journey orchestrator.
    pub orchestrator: Arc<JourneyOrchestrator>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(orchestrator: Arc<JourneyOrchestrator>) -> Self {
        Self { orchestrator }
    }
}
