//! Hotel offer model

use serde::{Deserialize, Serialize};

/// Star rating used when the provider does not supply one
pub const DEFAULT_RATING: f64 = 4.0;

/// Canonical nightly hotel offer
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HotelOffer {
    /// Hotel display name
    pub name: String,
    /// Provider hotel identifier (live results only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<String>,
    /// Price per night
    pub price: f64,
    /// Star rating within 0.0..=5.0
    pub rating: f64,
    /// Free-text location (neighbourhood, city)
    pub location: String,
    /// ISO 4217 currency code
    pub currency: String,
    /// Deep link into the provider's booking flow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_link: Option<String>,
}

impl HotelOffer {
    /// Build a catalog entry priced in USD
    #[must_use]
    pub fn listed(name: impl Into<String>, price: f64, rating: f64, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hotel_id: None,
            price,
            rating,
            location: location.into(),
            currency: "USD".to_string(),
            booking_link: None,
        }
    }

    /// Total for a stay of the given length
    #[must_use]
    pub fn stay_cost(&self, nights: u32) -> f64 {
        self.price * f64::from(nights)
    }
}
