//! Data models for the TripMind application
//!
//! This module contains the provider-agnostic domain models organized by concern:
//! - Flight: Canonical flight offer and its optional return leg
//! - Hotel: Canonical nightly hotel offer
//! - Search: Trip parameters, provenance and the aggregated search outcome

pub mod flight;
pub mod hotel;
pub mod search;

// Re-export all public types for convenient access
pub use flight::{FlightOffer, ReturnLeg};
pub use hotel::HotelOffer;
pub use search::{ItinerarySelection, Provenance, SearchOutcome, TripRequest};
