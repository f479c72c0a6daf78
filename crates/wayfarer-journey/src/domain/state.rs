//! Travel state and the journey lifecycle phase.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Where the journey stands right now.
///
/// Exactly one of these exists per orchestrator. Only accepted updates
/// mutate it; a failed or discarded update leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TravelState {
    /// True from a successful start until the next reset.
    pub is_active: bool,
    /// Where the character currently is.
    pub current_location: String,
    /// What the character is currently doing.
    pub current_activity: String,
    /// When the last update was accepted.
    pub last_update: Option<DateTime<Utc>>,
    /// When the next auto-advance is due, if one is pending.
    pub next_event_time: Option<DateTime<Utc>>,
}

/// Lifecycle phase of the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No journey has been started, or the last one was reset.
    NotStarted,
    /// A journey is underway and no update is in flight.
    Active,
    /// An update is in flight; further updates are rejected until it
    /// settles.
    Busy,
}
