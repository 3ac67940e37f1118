//! Authenticated HTTP client for the Amadeus flight and hotel endpoints

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument};

use super::session::CredentialSession;
use super::wire;
use super::MarketplaceProvider;
use crate::config::MarketplaceConfig;
use crate::format::airport_to_city;
use crate::models::{FlightOffer, HotelOffer, TripRequest};
use crate::{Result, TripMindError};

/// Marketplace API client sharing one credential session
pub struct MarketplaceClient {
    client: Client,
    session: Arc<CredentialSession>,
    base_url: String,
    max_flight_offers: u32,
    max_hotel_ids: usize,
    hotel_radius_km: u32,
    currency: String,
}

impl MarketplaceClient {
    pub fn new(config: &MarketplaceConfig, session: Arc<CredentialSession>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("TripMind/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripMindError::config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            session,
            base_url: config.api_base_url(),
            max_flight_offers: config.max_flight_offers,
            max_hotel_ids: config.max_hotel_ids as usize,
            hotel_radius_km: config.hotel_radius_km,
            currency: config.currency.clone(),
        })
    }

    /// Build the session and the client from one set of settings
    pub fn from_config(config: &MarketplaceConfig) -> Result<Self> {
        let session = Arc::new(CredentialSession::new(config)?);
        Self::new(config, session)
    }

    #[must_use]
    pub fn session(&self) -> &Arc<CredentialSession> {
        &self.session
    }

    /// Single-stage flight offers search
    #[instrument(skip(self, request), fields(origin = %request.origin, destination = %request.destination))]
    pub async fn flight_offers(&self, request: &TripRequest) -> Result<Vec<FlightOffer>> {
        let path = format!(
            "/v2/shopping/flight-offers?originLocationCode={}&destinationLocationCode={}\
             &departureDate={}&returnDate={}&adults={}&max={}&currencyCode={}",
            urlencoding::encode(&request.origin),
            urlencoding::encode(&request.destination),
            urlencoding::encode(&request.departure_param()),
            urlencoding::encode(&request.return_param()),
            request.passengers,
            self.max_flight_offers,
            urlencoding::encode(&self.currency),
        );

        let start_time = Instant::now();
        let body = self.get(&path).await?;
        let flights = wire::parse_flight_offers(&body)?;

        info!(
            "Found {} flight offers in {:.3}s",
            flights.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(flights)
    }

    /// Two-stage hotel search: hotel ids for the city, then best-rate offers for them
    #[instrument(skip(self, request), fields(destination = %request.destination))]
    pub async fn hotel_offers(&self, request: &TripRequest) -> Result<Vec<HotelOffer>> {
        let city_code = airport_to_city(&request.destination);

        let mut hotel_ids = self.hotel_ids(city_code).await?;
        if hotel_ids.is_empty() {
            return Err(TripMindError::no_inventory(format!(
                "no hotels found for city {city_code}"
            )));
        }
        hotel_ids.truncate(self.max_hotel_ids);

        let path = format!(
            "/v3/shopping/hotel-offers?hotelIds={}&checkInDate={}&checkOutDate={}\
             &adults={}&roomQuantity=1&currency={}&bestRateOnly=true",
            urlencoding::encode(&hotel_ids.join(",")),
            urlencoding::encode(&request.departure_param()),
            urlencoding::encode(&request.return_param()),
            request.passengers,
            urlencoding::encode(&self.currency),
        );

        let body = self.get(&path).await?;
        let hotels = wire::parse_hotel_offers(&body)?;

        info!(
            "Found {} hotel offers among {} hotels in {}",
            hotels.len(),
            hotel_ids.len(),
            city_code
        );
        Ok(hotels)
    }

    async fn hotel_ids(&self, city_code: &str) -> Result<Vec<String>> {
        let path = format!(
            "/v1/reference-data/locations/hotels/by-city?cityCode={}&radius={}&radiusUnit=KM&hotelSource=ALL",
            urlencoding::encode(city_code),
            self.hotel_radius_km,
        );

        let body = self.get(&path).await?;
        wire::parse_hotel_ids(&body)
    }

    /// Authenticated GET returning the raw body of a 2xx response
    async fn get(&self, path: &str) -> Result<Vec<u8>> {
        let token = self.session.acquire().await?;
        let url = format!("{}{}", self.base_url, path);

        debug!("Marketplace request URL: {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| TripMindError::network(format!("marketplace request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TripMindError::provider(status.as_u16(), body));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl MarketplaceProvider for MarketplaceClient {
    async fn search_flights(&self, request: &TripRequest) -> Result<Vec<FlightOffer>> {
        self.flight_offers(request).await
    }

    async fn search_hotels(&self, request: &TripRequest) -> Result<Vec<HotelOffer>> {
        self.hotel_offers(request).await
    }
}
