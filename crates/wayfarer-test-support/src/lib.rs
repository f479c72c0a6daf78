//! Shared test fakes and utilities for the Wayfarer journey engine.

mod clock;
mod generative;
mod scheduler;

pub use clock::ManualClock;
pub use generative::{FailingGenerativeClient, GatedGenerativeClient, ScriptedGenerativeClient};
pub use scheduler::ManualScheduler;
