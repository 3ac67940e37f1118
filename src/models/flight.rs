//! Flight offer model

use serde::{Deserialize, Serialize};

/// Canonical flight offer, independent of any marketplace wire format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FlightOffer {
    /// Total price for the offer
    pub price: f64,
    /// ISO 4217 currency code
    pub currency: String,
    /// Airline display name
    pub airline: String,
    /// IATA airline code (empty for synthetic offers)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub airline_code: String,
    /// Carrier code followed by the first segment's number
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub flight_number: String,
    /// Outbound departure timestamp
    pub departure_time: String,
    /// Outbound arrival timestamp
    pub arrival_time: String,
    /// Outbound duration, e.g. "5h 30m"
    pub duration: String,
    /// Outbound connection count
    pub stops: u32,
    /// Return leg, absent for one-way results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_leg: Option<ReturnLeg>,
    /// Deep link into the provider's booking flow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_link: Option<String>,
}

/// Return itinerary; all fields are present together or the leg is absent
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReturnLeg {
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub stops: u32,
}

impl FlightOffer {
    #[must_use]
    pub fn is_round_trip(&self) -> bool {
        self.return_leg.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FlightOffer {
        FlightOffer {
            price: 420.0,
            currency: "USD".to_string(),
            airline: "Air France".to_string(),
            airline_code: "AF".to_string(),
            flight_number: "AF1081".to_string(),
            departure_time: "2025-06-01T09:15:00".to_string(),
            arrival_time: "2025-06-01T11:30:00".to_string(),
            duration: "1h 15m".to_string(),
            stops: 0,
            return_leg: None,
            booking_link: None,
        }
    }

    #[test]
    fn test_one_way_serialization_omits_return_leg() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("return_leg").is_none());
        assert!(json.get("booking_link").is_none());
        assert_eq!(json["flight_number"], "AF1081");
    }

    #[test]
    fn test_round_trip_flags() {
        let mut offer = sample();
        assert!(!offer.is_round_trip());

        offer.return_leg = Some(ReturnLeg {
            departure_time: "2025-06-05T18:00:00".to_string(),
            arrival_time: "2025-06-05T18:20:00".to_string(),
            duration: "1h 20m".to_string(),
            stops: 0,
        });
        assert!(offer.is_round_trip());
    }
}
