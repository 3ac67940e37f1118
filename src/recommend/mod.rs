//! Trip recommendation: AI-written when possible, cheapest-pair heuristic otherwise

use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::{FlightOffer, HotelOffer, TripRequest};
use crate::{Result, TripMindError};

pub mod assistant;
pub mod prompt;

pub use assistant::{HuggingFaceClient, TextGenerator};
pub use prompt::build_prompt;

/// Returned when there is nothing at all to recommend from
pub const UNAVAILABLE_MESSAGE: &str = "Unable to provide recommendations at this time.";

/// Produces the recommendation text for a search
pub struct Recommender {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl Recommender {
    #[must_use]
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    /// A recommender that never calls an AI provider
    #[must_use]
    pub fn heuristic_only() -> Self {
        Self { generator: None }
    }

    /// Recommendation text for the given offers; never fails
    pub async fn recommend(
        &self,
        request: &TripRequest,
        flights: &[FlightOffer],
        hotels: &[HotelOffer],
        estimated: bool,
    ) -> String {
        match self.try_recommend(request, flights, hotels, estimated).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "No recommendation possible");
                UNAVAILABLE_MESSAGE.to_string()
            }
        }
    }

    /// Like [`Recommender::recommend`], but surfaces `EmptyInput` when both lists are empty
    pub async fn try_recommend(
        &self,
        request: &TripRequest,
        flights: &[FlightOffer],
        hotels: &[HotelOffer],
        estimated: bool,
    ) -> Result<String> {
        if flights.is_empty() && hotels.is_empty() {
            return Err(TripMindError::EmptyInput);
        }

        match &self.generator {
            Some(generator) => {
                let prompt = build_prompt(request, flights, hotels, estimated);
                match generator.generate(&prompt).await {
                    Ok(text) => return Ok(text),
                    Err(e) => warn!(error = %e, "AI recommendation failed, using price heuristic"),
                }
            }
            None => debug!("No AI provider configured, using price heuristic"),
        }

        heuristic_recommendation(request.budget, flights, hotels, request.nights())
            .ok_or(TripMindError::EmptyInput)
    }
}

/// Cheapest flight plus cheapest hotel, first occurrence winning ties.
///
/// Returns `None` only when both lists are empty.
#[must_use]
pub fn heuristic_recommendation(
    budget: f64,
    flights: &[FlightOffer],
    hotels: &[HotelOffer],
    nights: u32,
) -> Option<String> {
    let flight = flights
        .iter()
        .reduce(|best, f| if f.price < best.price { f } else { best });
    let hotel = hotels
        .iter()
        .reduce(|best, h| if h.price < best.price { h } else { best });

    let (summary, total, subject) = match (flight, hotel) {
        (Some(f), Some(h)) => {
            let total = f.price + h.stay_cost(nights);
            let summary = format!(
                "Best value picks: {} at ${:.0} ({} stops) and {} at ${:.0}/night (★ {:.1}). \
                 Estimated total: ${:.0} for flight + {} nights.",
                f.airline, f.price, f.stops, h.name, h.price, h.rating, total, nights
            );
            (summary, total, "This combination")
        }
        (Some(f), None) => {
            let summary = format!(
                "Best value flight: {} at ${:.0} ({} stops). Estimated total: ${:.0} for the flight.",
                f.airline, f.price, f.stops, f.price
            );
            (summary, f.price, "This flight")
        }
        (None, Some(h)) => {
            let total = h.stay_cost(nights);
            let summary = format!(
                "Best value hotel: {} at ${:.0}/night (★ {:.1}). Estimated total: ${:.0} for {} nights.",
                h.name, h.price, h.rating, total, nights
            );
            (summary, total, "This hotel")
        }
        (None, None) => return None,
    };

    let verdict = if total <= budget {
        format!(
            " {subject} fits your ${budget:.0} budget. You have ${:.0} to spare.",
            budget - total
        )
    } else {
        format!(
            " Note: This exceeds your ${budget:.0} budget by ${:.0}.",
            total - budget
        )
    };

    Some(summary + &verdict)
}
