//! Parsing and normalization of backend replies.

use serde::Deserialize;
use wayfarer_core::error::TravelError;

use crate::domain::JourneyUpdate;

/// Longest next-event delay the journey will schedule, in hours.
///
/// The prompt asks for single-digit hours; anything past a year means the
/// reply is garbage, not a long layover.
const MAX_DELAY_HOURS: f64 = 24.0 * 365.0;

/// Wire shape of the backend's JSON reply.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUpdate {
    current_location: String,
    current_activity: String,
    event_description: String,
    next_event_time: f64,
    #[serde(default)]
    needs_user_input: bool,
}

/// Parses a raw backend reply into a [`JourneyUpdate`].
///
/// Strips a surrounding Markdown code fence if the backend wrapped its
/// reply in one, decodes the JSON object, and normalizes the fields. The
/// delay must be a positive, finite number of hours a timer can actually
/// wait for.
///
/// # Errors
///
/// Returns [`TravelError::MalformedResponse`] when the payload is not a
/// JSON object, a required field is missing or of the wrong type, or the
/// delay cannot schedule a future event.
pub fn parse_update(raw: &str) -> Result<JourneyUpdate, TravelError> {
    let stripped = strip_code_fence(raw);
    let parsed: RawUpdate = serde_json::from_str(stripped)
        .map_err(|e| TravelError::MalformedResponse(e.to_string()))?;

    if !parsed.next_event_time.is_finite() || parsed.next_event_time <= 0.0 {
        return Err(TravelError::MalformedResponse(format!(
            "nextEventTime must be a positive number of hours, got {}",
            parsed.next_event_time
        )));
    }
    if parsed.next_event_time > MAX_DELAY_HOURS {
        return Err(TravelError::MalformedResponse(format!(
            "nextEventTime of {} hours is out of range",
            parsed.next_event_time
        )));
    }

    Ok(JourneyUpdate {
        current_location: parsed.current_location,
        current_activity: parsed.current_activity,
        event_description: parsed.event_description,
        next_event_delay_hours: parsed.next_event_time,
        needs_user_input: parsed.needs_user_input,
    })
}

/// Removes a wrapping Markdown code fence, with or without a `json` info
/// string, and trims the remainder.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}
