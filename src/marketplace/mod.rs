//! Flight and hotel marketplace integration (Amadeus self-service APIs)

use async_trait::async_trait;

use crate::Result;
use crate::models::{FlightOffer, HotelOffer, TripRequest};

pub mod client;
pub mod session;
pub mod wire;

pub use client::MarketplaceClient;
pub use session::CredentialSession;

/// Live source of flight and hotel offers.
///
/// Implementations make a single attempt per call and never retry; the
/// aggregator decides what to do on failure.
#[async_trait]
pub trait MarketplaceProvider: Send + Sync {
    /// Round-trip flight offers for the request's route and dates
    async fn search_flights(&self, request: &TripRequest) -> Result<Vec<FlightOffer>>;

    /// Best-rate hotel offers near the request's destination for the stay window
    async fn search_hotels(&self, request: &TripRequest) -> Result<Vec<HotelOffer>>;
}
