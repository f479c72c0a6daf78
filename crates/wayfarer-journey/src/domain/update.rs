//! The normalized backend reply.

use serde::Serialize;

/// One narrative step, as parsed out of a backend reply.
///
/// Transient: the orchestrator consumes it immediately to append a
/// `TravelEvent` and overwrite the mutable parts of `TravelState`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneyUpdate {
    /// Where the character is after this step.
    pub current_location: String,
    /// What the character is doing after this step.
    pub current_activity: String,
    /// Narrative text for this step.
    pub event_description: String,
    /// Hours until the next auto-advance should fire. Positive and finite.
    pub next_event_delay_hours: f64,
    /// Presentation hint: the backend would like a user decision.
    pub needs_user_input: bool,
}
