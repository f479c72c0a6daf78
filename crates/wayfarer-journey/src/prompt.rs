//! Prompt construction for the generative backend.
//!
//! Pure text assembly with no I/O and no hidden state: the same profile,
//! travel state, and clock reading always produce the same prompt. Every
//! prompt restates the reply schema the response parser expects, so the
//! backend never has to remember it across calls.

use chrono::{DateTime, Utc};
use wayfarer_core::error::TravelError;

use crate::domain::{CharacterProfile, TravelState};

/// Checks the profile fields a prompt cannot do without.
///
/// # Errors
///
/// Returns [`TravelError::Validation`] naming the first blank field among
/// name, departure location, and destination.
pub fn validate_profile(profile: &CharacterProfile) -> Result<(), TravelError> {
    if profile.name.trim().is_empty() {
        return Err(TravelError::Validation(
            "character name must not be empty".into(),
        ));
    }
    if profile.departure_location.trim().is_empty() {
        return Err(TravelError::Validation(
            "departure location must not be empty".into(),
        ));
    }
    if profile.destination.trim().is_empty() {
        return Err(TravelError::Validation(
            "destination must not be empty".into(),
        ));
    }
    Ok(())
}

/// Builds the opening prompt for a brand-new journey.
#[must_use]
pub fn start_prompt(profile: &CharacterProfile, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    push_narrator_preamble(&mut out);
    push_character_block(&mut out, profile);
    out.push_str(&format!(
        "The time is {}. {} has just set out from {}, heading for {}.\n\
         Narrate the journey's opening event and estimate when the next update should arrive.\n\n",
        format_timestamp(now),
        profile.name,
        profile.departure_location,
        profile.destination,
    ));
    push_reply_schema(&mut out);
    push_grounding_rules(&mut out);
    out
}

/// Builds the prompt for a timer-driven continuation of an active journey.
///
/// Carries the same character context as the opening prompt plus the
/// current location and activity, so the story picks up where it left off.
#[must_use]
pub fn continuation_prompt(
    profile: &CharacterProfile,
    state: &TravelState,
    now: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    push_narrator_preamble(&mut out);
    push_character_block(&mut out, profile);
    out.push_str(&format!(
        "The time is {}. {} is already on the road:\n\
         - Current location: {}\n\
         - Current activity: {}\n\
         Narrate the next event of the journey and estimate when the following update should arrive.\n\n",
        format_timestamp(now),
        profile.name,
        state.current_location,
        state.current_activity,
    ));
    push_reply_schema(&mut out);
    push_grounding_rules(&mut out);
    out
}

/// Builds the prompt for a user intervention.
///
/// Leaner than the journey prompts: the current position plus the user's
/// directive, quoted verbatim so nothing the user asked for gets lost.
#[must_use]
pub fn intervention_prompt(
    profile: &CharacterProfile,
    state: &TravelState,
    user_message: &str,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} is traveling right now.\n\
         - Current location: {}\n\
         - Current activity: {}\n\n\
         The user just sent a message steering the journey: \"{}\"\n\n\
         Follow the user's directive: narrate what the character does next and what comes of it.\n\n",
        profile.name, state.current_location, state.current_activity, user_message,
    ));
    push_reply_schema(&mut out);
    out
}

fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn push_narrator_preamble(out: &mut String) {
    out.push_str(
        "You are the narrator of a virtual travel simulation, generating a believable \
         journey for one fictional traveler.\n\n",
    );
}

fn push_character_block(out: &mut String, profile: &CharacterProfile) {
    out.push_str("The traveler:\n");
    out.push_str(&format!("- Name: {}\n", profile.name));
    out.push_str(&format!("- Persona: {}\n", profile.description));
    out.push_str(&format!("- Departure: {}\n", profile.departure_location));
    out.push_str(&format!("- Destination: {}\n", profile.destination));
    out.push_str(&format!(
        "- Travel method: {} ({})\n",
        profile.travel_method.name(),
        profile.travel_method.description(),
    ));
    out.push_str(&format!(
        "- Travel style: {} ({})\n\n",
        profile.travel_style.name(),
        profile.travel_style.description(),
    ));
}

fn push_reply_schema(out: &mut String) {
    out.push_str(
        "Reply with a single JSON object and nothing else, in exactly this shape:\n\
         {\n\
         \x20 \"currentLocation\": \"where the character is now, specific enough to place on a map\",\n\
         \x20 \"currentActivity\": \"what the character is doing\",\n\
         \x20 \"eventDescription\": \"a vivid account of what just happened, about 200 words\",\n\
         \x20 \"nextEventTime\": 1.5,\n\
         \x20 \"needsUserInput\": false\n\
         }\n\
         \"nextEventTime\" is the number of hours until the next event.\n\
         Set \"needsUserInput\" to true only when the character faces a decision the user should make.\n\n",
    );
}

fn push_grounding_rules(out: &mut String) {
    out.push_str(
        "Keep it grounded:\n\
         1. The experience must stay plausible for this route.\n\
         2. Respect the travel method and the real geography between departure and destination.\n\
         3. Events should be interesting and stay true to the character.\n\
         4. Time estimates must be realistic, usually 0.5 to 3 hours between events.\n",
    );
}
