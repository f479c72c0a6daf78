//! Wayfarer Journey — the journey orchestration core.
//!
//! Builds prompts from the character and the travel state, interprets the
//! backend's structured replies, and drives the single canonical journey:
//! timed auto-advance between narrative events, user interventions that
//! redirect the story, and a full reset back to the blank state.

pub mod domain;
pub mod orchestrator;
pub mod parser;
pub mod prompt;

pub use orchestrator::JourneyOrchestrator;
