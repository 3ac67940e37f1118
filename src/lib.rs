//! `TripMind` - Flight and hotel aggregation for trip planning
//!
//! This library talks to the Amadeus marketplace for live flight and hotel
//! offers, substitutes deterministic estimates whenever live data is unavailable,
//! and produces a short recommendation through an AI provider or a price heuristic.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod fallback;
pub mod format;
pub mod logging;
pub mod marketplace;
pub mod models;
pub mod recommend;

// Re-export core types for public API
pub use aggregator::TripAggregator;
pub use config::TripMindConfig;
pub use error::TripMindError;
pub use fallback::{synthesize_flights, synthesize_hotels};
pub use marketplace::{CredentialSession, MarketplaceClient, MarketplaceProvider};
pub use models::{
    FlightOffer, HotelOffer, ItinerarySelection, Provenance, ReturnLeg, SearchOutcome,
    TripRequest,
};
pub use recommend::{HuggingFaceClient, Recommender, TextGenerator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripMindError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
