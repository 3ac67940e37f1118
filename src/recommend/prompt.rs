//! Instruction prompt for the text-generation model

use crate::models::{FlightOffer, HotelOffer, TripRequest};

/// Offers of each kind included in the prompt, taken in input order
pub const MAX_PROMPT_OFFERS: usize = 5;

const ESTIMATED_NOTE: &str = " Note: prices are estimated — real-time data unavailable.";

/// Build a Mistral-style `[INST]` prompt describing the trip and the first few offers
#[must_use]
pub fn build_prompt(
    request: &TripRequest,
    flights: &[FlightOffer],
    hotels: &[HotelOffer],
    estimated: bool,
) -> String {
    let note = if estimated { ESTIMATED_NOTE } else { "" };

    let mut prompt = format!(
        "[INST] You are a helpful travel assistant. Analyze these options and give brief, honest recommendations.\n\n\
         Trip: {} → {} | {} to {} | {} passenger(s) | Budget: ${:.0}{}\n\n\
         Flights available:\n",
        request.origin,
        request.destination,
        request.departure_param(),
        request.return_param(),
        request.passengers,
        request.budget,
        note,
    );

    for (i, flight) in flights.iter().take(MAX_PROMPT_OFFERS).enumerate() {
        prompt.push_str(&format!(
            "  {}. {} — ${:.0} ({} stop(s), {})\n",
            i + 1,
            flight.airline,
            flight.price,
            flight.stops,
            flight.duration
        ));
    }

    prompt.push_str("\nHotels (per night):\n");
    for (i, hotel) in hotels.iter().take(MAX_PROMPT_OFFERS).enumerate() {
        prompt.push_str(&format!(
            "  {}. {} — ${:.0}/night (★{:.1}) {}\n",
            i + 1,
            hotel.name,
            hotel.price,
            hotel.rating,
            hotel.location
        ));
    }

    prompt.push_str(
        "\nIn 150 words or fewer, recommend the best flight and hotel that fit the budget. \
         Explain why briefly. Use sections: \"✈ Flight:\" and \"🏨 Hotel:\". Be direct. [/INST]",
    );

    prompt
}
