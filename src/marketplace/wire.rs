//! Amadeus wire-format structures and their mapping onto the canonical models.
//!
//! Nothing in here leaks out of the marketplace module: responses are decoded into
//! these intermediate types and then mapped field by field, dropping records that
//! cannot be priced.

use serde::Deserialize;

use crate::format::{airline_name, format_iso_duration, parse_price, parse_rating};
use crate::models::{FlightOffer, HotelOffer, ReturnLeg};
use crate::{Result, TripMindError};

#[derive(Debug, Deserialize)]
pub struct FlightOffersResponse {
    pub data: Vec<FlightOfferData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOfferData {
    #[serde(default)]
    pub price: FlightPrice,
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
    #[serde(default)]
    pub validating_airline_codes: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightPrice {
    #[serde(default)]
    pub grand_total: String,
    #[serde(default)]
    pub currency: String,
}

#[derive(Debug, Deserialize)]
pub struct Itinerary {
    /// ISO-8601 duration, e.g. "PT5H30M"
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub departure: SegmentEndpoint,
    pub arrival: SegmentEndpoint,
    #[serde(default)]
    pub carrier_code: String,
    #[serde(default)]
    pub number: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentEndpoint {
    #[serde(default)]
    pub iata_code: String,
    /// Local timestamp without offset, e.g. "2025-06-01T09:15:00"
    #[serde(default)]
    pub at: String,
}

#[derive(Debug, Deserialize)]
pub struct HotelListResponse {
    pub data: Vec<HotelReference>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelReference {
    pub hotel_id: String,
}

#[derive(Debug, Deserialize)]
pub struct HotelOffersResponse {
    pub data: Vec<HotelOfferData>,
}

#[derive(Debug, Deserialize)]
pub struct HotelOfferData {
    pub hotel: HotelInfo,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub offers: Vec<RoomOffer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelInfo {
    #[serde(default)]
    pub hotel_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city_code: String,
    #[serde(default)]
    pub address: Option<HotelAddress>,
    #[serde(default)]
    pub rating: Option<RatingField>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelAddress {
    #[serde(default)]
    pub city_name: String,
}

/// Star rating as sent by the provider, usually a string ("4") but sometimes a number
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RatingField {
    Text(String),
    Number(f64),
}

impl RatingField {
    fn as_text(&self) -> String {
        match self {
            RatingField::Text(s) => s.clone(),
            RatingField::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RoomOffer {
    pub price: RoomPrice,
}

#[derive(Debug, Deserialize)]
pub struct RoomPrice {
    #[serde(default)]
    pub total: String,
    #[serde(default)]
    pub currency: String,
}

/// Decode a flight-offers body, keeping only offers with an itinerary and a positive price
pub fn parse_flight_offers(body: &[u8]) -> Result<Vec<FlightOffer>> {
    let response: FlightOffersResponse = serde_json::from_slice(body)
        .map_err(|e| TripMindError::parse(format!("failed to parse flight offers: {e}")))?;

    Ok(response
        .data
        .into_iter()
        .filter_map(FlightOfferData::into_offer)
        .collect())
}

/// Decode a hotel-list body into hotel identifiers, in provider order
pub fn parse_hotel_ids(body: &[u8]) -> Result<Vec<String>> {
    let response: HotelListResponse = serde_json::from_slice(body)
        .map_err(|e| TripMindError::parse(format!("failed to parse hotel list: {e}")))?;

    Ok(response.data.into_iter().map(|h| h.hotel_id).collect())
}

/// Decode a hotel-offers body, keeping available hotels with a positive first offer
pub fn parse_hotel_offers(body: &[u8]) -> Result<Vec<HotelOffer>> {
    let response: HotelOffersResponse = serde_json::from_slice(body)
        .map_err(|e| TripMindError::parse(format!("failed to parse hotel offers: {e}")))?;

    Ok(response
        .data
        .into_iter()
        .filter_map(HotelOfferData::into_offer)
        .collect())
}

impl Itinerary {
    fn departure_time(&self) -> String {
        self.segments
            .first()
            .map(|s| s.departure.at.clone())
            .unwrap_or_default()
    }

    fn arrival_time(&self) -> String {
        self.segments
            .last()
            .map(|s| s.arrival.at.clone())
            .unwrap_or_default()
    }

    fn stops(&self) -> u32 {
        u32::try_from(self.segments.len().saturating_sub(1)).unwrap_or(u32::MAX)
    }
}

impl FlightOfferData {
    fn into_offer(self) -> Option<FlightOffer> {
        let outbound = self.itineraries.first()?;

        let price = parse_price(&self.price.grand_total);
        if price <= 0.0 {
            return None;
        }

        let airline_code = outbound
            .segments
            .first()
            .map(|s| s.carrier_code.clone())
            .or_else(|| self.validating_airline_codes.first().cloned())
            .unwrap_or_default();

        let flight_number = outbound
            .segments
            .first()
            .map(|s| format!("{airline_code}{}", s.number))
            .unwrap_or_default();

        let return_leg = self.itineraries.get(1).map(|inbound| ReturnLeg {
            departure_time: inbound.departure_time(),
            arrival_time: inbound.arrival_time(),
            duration: format_iso_duration(&inbound.duration),
            stops: inbound.stops(),
        });

        Some(FlightOffer {
            price,
            currency: self.price.currency.clone(),
            airline: airline_name(&airline_code),
            flight_number,
            departure_time: outbound.departure_time(),
            arrival_time: outbound.arrival_time(),
            duration: format_iso_duration(&outbound.duration),
            stops: outbound.stops(),
            return_leg,
            booking_link: None,
            airline_code,
        })
    }
}

impl HotelOfferData {
    fn into_offer(self) -> Option<HotelOffer> {
        if !self.available {
            return None;
        }
        let offer = self.offers.first()?;

        let price = parse_price(&offer.price.total);
        if price <= 0.0 {
            return None;
        }

        let rating_text = self.hotel.rating.as_ref().map(RatingField::as_text);
        let location = self
            .hotel
            .address
            .as_ref()
            .map(|a| a.city_name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.hotel.city_code.clone());

        Some(HotelOffer {
            name: self.hotel.name,
            hotel_id: Some(self.hotel.hotel_id).filter(|id| !id.is_empty()),
            price,
            rating: parse_rating(rating_text.as_deref()),
            location,
            currency: offer.price.currency.clone(),
            booking_link: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUND_TRIP: &str = r#"{
        "meta": {"count": 3},
        "data": [
            {
                "price": {"grandTotal": "412.30", "currency": "USD"},
                "validatingAirlineCodes": ["AF"],
                "itineraries": [
                    {"duration": "PT5H30M", "segments": [
                        {"departure": {"iataCode": "LHR", "at": "2025-06-01T07:00:00"},
                         "arrival": {"iataCode": "CDG", "at": "2025-06-01T09:15:00"},
                         "carrierCode": "AF", "number": "1081"},
                        {"departure": {"iataCode": "CDG", "at": "2025-06-01T10:30:00"},
                         "arrival": {"iataCode": "IST", "at": "2025-06-01T14:30:00"},
                         "carrierCode": "AF", "number": "1390"}
                    ]},
                    {"duration": "PT4H", "segments": [
                        {"departure": {"iataCode": "IST", "at": "2025-06-05T18:00:00"},
                         "arrival": {"iataCode": "LHR", "at": "2025-06-05T20:00:00"},
                         "carrierCode": "AF", "number": "1391"}
                    ]}
                ]
            },
            {
                "price": {"grandTotal": "abc", "currency": "USD"},
                "itineraries": [{"duration": "PT2H", "segments": []}]
            },
            {
                "price": {"grandTotal": "199.00", "currency": "USD"},
                "itineraries": []
            }
        ]
    }"#;

    #[test]
    fn test_parse_flight_offers_maps_and_filters() {
        let flights = parse_flight_offers(ROUND_TRIP.as_bytes()).unwrap();
        assert_eq!(flights.len(), 1);

        let flight = &flights[0];
        assert_eq!(flight.price, 412.30);
        assert_eq!(flight.airline, "Air France");
        assert_eq!(flight.airline_code, "AF");
        assert_eq!(flight.flight_number, "AF1081");
        assert_eq!(flight.departure_time, "2025-06-01T07:00:00");
        assert_eq!(flight.arrival_time, "2025-06-01T14:30:00");
        assert_eq!(flight.duration, "5h 30m");
        assert_eq!(flight.stops, 1);

        let leg = flight.return_leg.as_ref().unwrap();
        assert_eq!(leg.departure_time, "2025-06-05T18:00:00");
        assert_eq!(leg.duration, "4h");
        assert_eq!(leg.stops, 0);
    }

    #[test]
    fn test_one_way_offer_uses_validating_airline() {
        let body = r#"{"data": [{
            "price": {"grandTotal": "150", "currency": "EUR"},
            "validatingAirlineCodes": ["LH"],
            "itineraries": [{"duration": "PT1H10M", "segments": []}]
        }]}"#;

        let flights = parse_flight_offers(body.as_bytes()).unwrap();
        assert_eq!(flights[0].airline, "Lufthansa");
        assert_eq!(flights[0].currency, "EUR");
        assert_eq!(flights[0].stops, 0);
        assert!(flights[0].flight_number.is_empty());
        assert!(!flights[0].is_round_trip());
    }

    #[test]
    fn test_schema_mismatch_is_parse_error() {
        let err = parse_flight_offers(br#"{"errors": [{"status": 400}]}"#).unwrap_err();
        assert!(matches!(err, TripMindError::Parse { .. }));

        let err = parse_hotel_ids(b"<html>").unwrap_err();
        assert!(matches!(err, TripMindError::Parse { .. }));
    }

    #[test]
    fn test_parse_hotel_ids() {
        let body = r#"{"data": [{"hotelId": "HLPAR001", "name": "A"}, {"hotelId": "HLPAR002"}]}"#;
        assert_eq!(
            parse_hotel_ids(body.as_bytes()).unwrap(),
            vec!["HLPAR001", "HLPAR002"]
        );
    }

    #[test]
    fn test_parse_hotel_offers() {
        let body = r#"{"data": [
            {"hotel": {"hotelId": "H1", "name": "Hotel Lutetia", "cityCode": "PAR",
                       "address": {"cityName": "Paris"}, "rating": "5"},
             "available": true,
             "offers": [{"price": {"total": "310.00", "currency": "EUR"}}]},
            {"hotel": {"hotelId": "H2", "name": "Overrated", "cityCode": "PAR", "rating": "9"},
             "available": true,
             "offers": [{"price": {"total": "120.50", "currency": "EUR"}}]},
            {"hotel": {"hotelId": "H3", "name": "Sold Out", "cityCode": "PAR"},
             "available": false,
             "offers": [{"price": {"total": "99.00", "currency": "EUR"}}]},
            {"hotel": {"hotelId": "H4", "name": "No Offers", "cityCode": "PAR"},
             "available": true,
             "offers": []},
            {"hotel": {"hotelId": "H5", "name": "Free", "cityCode": "PAR"},
             "available": true,
             "offers": [{"price": {"total": "0", "currency": "EUR"}}]}
        ]}"#;

        let hotels = parse_hotel_offers(body.as_bytes()).unwrap();
        assert_eq!(hotels.len(), 2);

        assert_eq!(hotels[0].name, "Hotel Lutetia");
        assert_eq!(hotels[0].hotel_id.as_deref(), Some("H1"));
        assert_eq!(hotels[0].location, "Paris");
        assert_eq!(hotels[0].rating, 5.0);
        assert_eq!(hotels[0].currency, "EUR");

        assert_eq!(hotels[1].location, "PAR");
        assert_eq!(hotels[1].rating, 5.0);
        assert_eq!(hotels[1].price, 120.5);
    }

    #[test]
    fn test_missing_rating_defaults() {
        let body = r#"{"data": [
            {"hotel": {"hotelId": "H1", "name": "Plain", "cityCode": "IST", "rating": 3},
             "available": true,
             "offers": [{"price": {"total": "80", "currency": "USD"}}]},
            {"hotel": {"hotelId": "H2", "name": "Unrated", "cityCode": "IST"},
             "available": true,
             "offers": [{"price": {"total": "70", "currency": "USD"}}]}
        ]}"#;

        let hotels = parse_hotel_offers(body.as_bytes()).unwrap();
        assert_eq!(hotels[0].rating, 3.0);
        assert_eq!(hotels[1].rating, 4.0);
    }
}
