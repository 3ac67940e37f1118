//! Trip request, provenance and aggregated search outcome

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{FlightOffer, HotelOffer};

/// Parameters of a single, already validated trip search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Origin airport IATA code
    pub origin: String,
    /// Destination airport or city IATA code
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    /// Total budget in USD
    pub budget: f64,
    /// Number of adult travellers
    pub passengers: u32,
}

impl TripRequest {
    /// Create a request, normalizing codes and defaulting passengers to one
    #[must_use]
    pub fn new(
        origin: &str,
        destination: &str,
        departure_date: NaiveDate,
        return_date: NaiveDate,
        budget: f64,
        passengers: u32,
    ) -> Self {
        Self {
            origin: origin.trim().to_uppercase(),
            destination: destination.trim().to_uppercase(),
            departure_date,
            return_date,
            budget,
            passengers: passengers.max(1),
        }
    }

    /// Whole nights between departure and return
    #[must_use]
    pub fn nights(&self) -> u32 {
        let days = (self.return_date - self.departure_date).num_days();
        u32::try_from(days).unwrap_or(0)
    }

    /// Departure date in `YYYY-MM-DD` form
    #[must_use]
    pub fn departure_param(&self) -> String {
        self.departure_date.format("%Y-%m-%d").to_string()
    }

    /// Return date in `YYYY-MM-DD` form
    #[must_use]
    pub fn return_param(&self) -> String {
        self.return_date.format("%Y-%m-%d").to_string()
    }
}

/// Where the offers in a search outcome came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Both flights and hotels came from the live marketplace
    Live,
    /// At least one resource was synthesized
    Estimated,
}

impl Provenance {
    /// Live only when both resources resolved live
    #[must_use]
    pub fn from_resolution(flights_live: bool, hotels_live: bool) -> Self {
        if flights_live && hotels_live {
            Provenance::Live
        } else {
            Provenance::Estimated
        }
    }

    #[must_use]
    pub fn is_estimated(self) -> bool {
        self == Provenance::Estimated
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Provenance::Live => "live",
            Provenance::Estimated => "estimated",
        }
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate handed to the persistence and response layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    flights: Vec<FlightOffer>,
    hotels: Vec<HotelOffer>,
    source: Provenance,
    recommendation: String,
}

/// A chosen flight/hotel pair with its stay cost
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItinerarySelection {
    pub flight: FlightOffer,
    pub hotel: HotelOffer,
    pub nights: u32,
    pub total_cost: f64,
}

impl SearchOutcome {
    #[must_use]
    pub fn new(
        flights: Vec<FlightOffer>,
        hotels: Vec<HotelOffer>,
        source: Provenance,
        recommendation: String,
    ) -> Self {
        Self {
            flights,
            hotels,
            source,
            recommendation,
        }
    }

    #[must_use]
    pub fn flights(&self) -> &[FlightOffer] {
        &self.flights
    }

    #[must_use]
    pub fn hotels(&self) -> &[HotelOffer] {
        &self.hotels
    }

    #[must_use]
    pub fn source(&self) -> Provenance {
        self.source
    }

    #[must_use]
    pub fn recommendation(&self) -> &str {
        &self.recommendation
    }

    /// Pick one flight and one hotel for a document.
    ///
    /// Out-of-range indices fall back to the first entry. Returns `None` only when
    /// either list is empty.
    #[must_use]
    pub fn select(
        &self,
        flight_index: usize,
        hotel_index: usize,
        nights: u32,
    ) -> Option<ItinerarySelection> {
        let flight = self
            .flights
            .get(flight_index)
            .or_else(|| self.flights.first())?;
        let hotel = self
            .hotels
            .get(hotel_index)
            .or_else(|| self.hotels.first())?;

        Some(ItinerarySelection {
            flight: flight.clone(),
            hotel: hotel.clone(),
            nights,
            total_cost: flight.price + hotel.stay_cost(nights),
        })
    }
}
