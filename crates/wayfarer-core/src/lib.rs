//! Wayfarer Core — shared ports and error types.
//!
//! This crate defines the abstractions the journey orchestration core is
//! written against: wall-clock time, one-shot timers, and the generative
//! text backend. It contains no network or presentation code.

pub mod error;
pub mod generative;
pub mod time;
