//! Deterministic stand-ins for marketplace results
//!
//! Both generators are pure: output depends only on the route and dates passed
//! in, never on the clock, so identical inputs give identical offers.

use chrono::{NaiveDate, NaiveTime, SecondsFormat, TimeDelta};

use crate::format::format_minutes;
use crate::models::{FlightOffer, HotelOffer, ReturnLeg};

pub mod catalog;

use catalog::{AIRLINES, GENERIC_HOTELS, city_hotels, route_profile};

/// Extra block time for a one-stop itinerary
const CONNECTION_MINUTES: u32 = 90;
const FIRST_OUTBOUND_HOUR: i64 = 6;
const OUTBOUND_SPACING_HOURS: i64 = 3;
const FIRST_RETURN_HOUR: i64 = 8;
const RETURN_SPACING_HOURS: i64 = 2;

/// Five estimated round-trip offers, one per airline profile
#[must_use]
pub fn synthesize_flights(
    origin: &str,
    destination: &str,
    departure_date: NaiveDate,
    return_date: NaiveDate,
) -> Vec<FlightOffer> {
    let route = route_profile(origin, destination);

    AIRLINES
        .iter()
        .zip(0_i64..)
        .map(|(airline, index)| {
            let price = round_down_to_five(route.base_price * airline.price_multiplier);
            let minutes = if airline.stops > 0 {
                route.minutes + CONNECTION_MINUTES
            } else {
                route.minutes
            };
            let block = TimeDelta::minutes(i64::from(minutes));
            let duration = format_minutes(minutes);

            let outbound_hour = FIRST_OUTBOUND_HOUR + OUTBOUND_SPACING_HOURS * index;
            let return_hour = FIRST_RETURN_HOUR + RETURN_SPACING_HOURS * index;
            let (departure_time, arrival_time) = leg_times(departure_date, outbound_hour, block);
            let (return_departure, return_arrival) = leg_times(return_date, return_hour, block);

            FlightOffer {
                price,
                currency: "USD".to_string(),
                airline: airline.name.to_string(),
                airline_code: String::new(),
                flight_number: String::new(),
                departure_time,
                arrival_time,
                duration: duration.clone(),
                stops: airline.stops,
                return_leg: Some(ReturnLeg {
                    departure_time: return_departure,
                    arrival_time: return_arrival,
                    duration,
                    stops: airline.stops,
                }),
                booking_link: None,
            }
        })
        .collect()
}

/// Five estimated hotels for the destination, from the catalog or a generic list
#[must_use]
pub fn synthesize_hotels(destination: &str) -> Vec<HotelOffer> {
    if let Some(hotels) = city_hotels(destination) {
        return hotels
            .iter()
            .map(|h| HotelOffer::listed(h.name, h.price, h.rating, h.location))
            .collect();
    }

    GENERIC_HOTELS
        .iter()
        .map(|(name, price, rating, district)| {
            HotelOffer::listed(*name, *price, *rating, format!("{district}, {destination}"))
        })
        .collect()
}

fn round_down_to_five(amount: f64) -> f64 {
    (amount / 5.0).floor() * 5.0
}

/// RFC 3339 UTC departure and arrival for a leg leaving at `hour` on `date`
fn leg_times(date: NaiveDate, hour: i64, block: TimeDelta) -> (String, String) {
    let departure = (date.and_time(NaiveTime::MIN) + TimeDelta::hours(hour)).and_utc();
    let arrival = departure + block;

    (
        departure.to_rfc3339_opts(SecondsFormat::Secs, true),
        arrival.to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[rstest]
    #[case("LHR", "CDG")]
    #[case("TAS", "IST")]
    #[case("AAA", "ZZZ")]
    fn test_five_positive_offers(#[case] origin: &str, #[case] destination: &str) {
        let flights = synthesize_flights(origin, destination, date("2025-06-01"), date("2025-06-05"));

        assert_eq!(flights.len(), 5);
        for flight in &flights {
            assert!(flight.price > 0.0);
            assert!(flight.is_round_trip());
            assert_eq!(flight.currency, "USD");
        }
    }

    #[test]
    fn test_flights_are_deterministic() {
        let first = synthesize_flights("IST", "DXB", date("2025-03-10"), date("2025-03-17"));
        let second = synthesize_flights("IST", "DXB", date("2025-03-10"), date("2025-03-17"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_prices_round_down_to_five() {
        // LHR-CDG base 80: 80, 92, 104, 52, 64 before rounding
        let prices: Vec<f64> = synthesize_flights("LHR", "CDG", date("2025-06-01"), date("2025-06-05"))
            .iter()
            .map(|f| f.price)
            .collect();
        assert_eq!(prices, vec![80.0, 90.0, 100.0, 50.0, 60.0]);
    }

    #[test]
    fn test_default_route_and_connections() {
        let flights = synthesize_flights("AAA", "ZZZ", date("2025-06-01"), date("2025-06-05"));

        assert_eq!(flights[0].price, 350.0);
        assert_eq!(flights[0].duration, "4h");
        assert_eq!(flights[3].stops, 1);
        assert_eq!(flights[3].duration, "5h 30m");
    }

    #[test]
    fn test_departures_spread_across_the_day() {
        let flights = synthesize_flights("LHR", "CDG", date("2025-06-01"), date("2025-06-05"));

        assert_eq!(flights[0].departure_time, "2025-06-01T06:00:00Z");
        assert_eq!(flights[0].arrival_time, "2025-06-01T07:15:00Z");
        assert_eq!(flights[4].departure_time, "2025-06-01T18:00:00Z");

        let leg = flights[2].return_leg.as_ref().unwrap();
        assert_eq!(leg.departure_time, "2025-06-05T12:00:00Z");
        assert_eq!(leg.arrival_time, "2025-06-05T13:15:00Z");
        assert_eq!(leg.duration, flights[2].duration);
    }

    #[rstest]
    #[case("IST", "Grand Hyatt Istanbul")]
    #[case("PAR", "Hotel Le Marais")]
    #[case("BER", "Hotel Adlon Kempinski")]
    #[case("TAS", "Grand City Hotel")]
    fn test_five_hotels_per_destination(#[case] destination: &str, #[case] first: &str) {
        let hotels = synthesize_hotels(destination);

        assert_eq!(hotels.len(), 5);
        assert_eq!(hotels[0].name, first);
        for hotel in &hotels {
            assert!(hotel.price > 0.0);
            assert!((0.0..=5.0).contains(&hotel.rating));
        }
    }

    #[test]
    fn test_generic_hotels_are_templated() {
        let hotels = synthesize_hotels("TAS");
        assert_eq!(hotels[0].location, "City Center, TAS");
        assert_eq!(hotels[3].location, "Near Airport, TAS");
        assert_eq!(synthesize_hotels("TAS"), hotels);
    }
}
