//! The append-only narrative event log.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// What triggered a travel event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The opening event of a journey.
    JourneyStart,
    /// A timer-driven continuation.
    Auto,
    /// A continuation redirected by a user directive.
    UserIntervention,
}

/// One accepted narrative event. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelEvent {
    /// Unique, strictly increasing id derived from the acceptance time.
    pub id: i64,
    /// When the event was accepted.
    pub timestamp: DateTime<Utc>,
    /// What triggered the event.
    pub kind: EventKind,
    /// Narrative text.
    pub content: String,
    /// Presentation hint: the backend would like a user decision.
    pub needs_user_input: bool,
    /// The verbatim user directive, present on interventions only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_message: Option<String>,
}

/// Append-only sequence of accepted events, oldest first.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<TravelEvent>,
    last_id: i64,
}

impl EventLog {
    /// Appends an event accepted at `now` and returns its id.
    ///
    /// Ids follow the acceptance time in milliseconds; an append within the
    /// same millisecond takes the previous id plus one, so ids stay
    /// strictly increasing even under a frozen clock.
    pub fn append(
        &mut self,
        now: DateTime<Utc>,
        kind: EventKind,
        content: String,
        needs_user_input: bool,
        user_message: Option<String>,
    ) -> i64 {
        let millis = now.timestamp_millis();
        self.last_id = if millis > self.last_id {
            millis
        } else {
            self.last_id + 1
        };
        self.events.push(TravelEvent {
            id: self.last_id,
            timestamp: now,
            kind,
            content,
            needs_user_input,
            user_message,
        });
        self.last_id
    }

    /// Snapshot of all events, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<TravelEvent> {
        self.events.clone()
    }

    /// Number of events in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when no events have been accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Removes every event. The id watermark survives, so ids keep
    /// increasing across resets.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
