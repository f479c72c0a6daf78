//! Domain types for a single journey.

mod event;
mod profile;
mod state;
mod update;

pub use event::{EventKind, EventLog, TravelEvent};
pub use profile::{CharacterProfile, POPULAR_DESTINATIONS, TravelMethod, TravelStyle};
pub use state::{Phase, TravelState};
pub use update::JourneyUpdate;
