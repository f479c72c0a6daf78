//! Character profile and the travel catalogs it draws from.

use serde::{Deserialize, Serialize};

/// How the character gets around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMethod {
    Driving,
    Walking,
    Public,
    Backpacking,
    Luxury,
}

impl TravelMethod {
    /// All methods, in presentation order.
    pub const ALL: [TravelMethod; 5] = [
        TravelMethod::Driving,
        TravelMethod::Walking,
        TravelMethod::Public,
        TravelMethod::Backpacking,
        TravelMethod::Luxury,
    ];

    /// Stable identifier used on the wire.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            TravelMethod::Driving => "driving",
            TravelMethod::Walking => "walking",
            TravelMethod::Public => "public",
            TravelMethod::Backpacking => "backpacking",
            TravelMethod::Luxury => "luxury",
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TravelMethod::Driving => "Road trip",
            TravelMethod::Walking => "On foot",
            TravelMethod::Public => "Public transit",
            TravelMethod::Backpacking => "Backpacking",
            TravelMethod::Luxury => "Luxury travel",
        }
    }

    /// One-line description shown in the setup form and woven into prompts.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            TravelMethod::Driving => "Drives their own car and can reroute freely along the way",
            TravelMethod::Walking => "Explores on foot for a closer feel of each place",
            TravelMethod::Public => "Rides trains, buses, and whatever local transit runs",
            TravelMethod::Backpacking => "Travels light and cheap with a pack on their back",
            TravelMethod::Luxury => "Travels in comfort and spares no expense",
        }
    }
}

/// What the character wants out of the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelStyle {
    Adventure,
    Leisure,
    Cultural,
    Foodie,
}

impl TravelStyle {
    /// All styles, in presentation order.
    pub const ALL: [TravelStyle; 4] = [
        TravelStyle::Adventure,
        TravelStyle::Leisure,
        TravelStyle::Cultural,
        TravelStyle::Foodie,
    ];

    /// Stable identifier used on the wire.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            TravelStyle::Adventure => "adventure",
            TravelStyle::Leisure => "leisure",
            TravelStyle::Cultural => "cultural",
            TravelStyle::Foodie => "foodie",
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TravelStyle::Adventure => "Adventurous",
            TravelStyle::Leisure => "Leisurely",
            TravelStyle::Cultural => "Cultural",
            TravelStyle::Foodie => "Foodie",
        }
    }

    /// One-line description shown in the setup form and woven into prompts.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            TravelStyle::Adventure => "Chases thrills and out-of-the-way experiences",
            TravelStyle::Leisure => "Takes it slow and stops to rest often",
            TravelStyle::Cultural => "Digs into local history, museums, and traditions",
            TravelStyle::Foodie => "Plans the route around regional food and markets",
        }
    }
}

/// Destination suggestions offered by the setup form.
pub const POPULAR_DESTINATIONS: [&str; 16] = [
    "Beijing",
    "Shanghai",
    "Chengdu",
    "Xi'an",
    "Hangzhou",
    "Nanjing",
    "Tokyo",
    "Seoul",
    "Bangkok",
    "Singapore",
    "Paris",
    "London",
    "New York",
    "Los Angeles",
    "Sydney",
    "Rome",
];

/// A traveler. Fixed for the lifetime of a journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProfile {
    /// Character name.
    pub name: String,
    /// Free-text persona: temperament, interests, background.
    #[serde(default)]
    pub description: String,
    /// Where the journey begins.
    pub departure_location: String,
    /// Where the journey is headed.
    pub destination: String,
    /// How the character gets around.
    pub travel_method: TravelMethod,
    /// What the character wants out of the trip.
    pub travel_style: TravelStyle,
}
