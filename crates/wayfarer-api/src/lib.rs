//! Axum HTTP surface for the Wayfarer journey engine.
//!
//! Thin by intent: handlers translate between HTTP and the journey
//! orchestrator, and every domain decision stays in `wayfarer-journey`.

pub mod error;
pub mod routes;
pub mod state;
