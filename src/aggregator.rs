//! Per-search orchestration of live marketplace data, estimated fallbacks and the
//! recommendation step.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::config::TripMindConfig;
use crate::fallback::{synthesize_flights, synthesize_hotels};
use crate::marketplace::{CredentialSession, MarketplaceClient, MarketplaceProvider};
use crate::models::{Provenance, SearchOutcome, TripRequest};
use crate::recommend::{HuggingFaceClient, Recommender, TextGenerator};
use crate::Result;

/// Offers for one resource and whether they came from the live marketplace
struct Resolved<T> {
    offers: Vec<T>,
    live: bool,
}

/// Take live offers when the attempt produced some, otherwise synthesize.
///
/// `attempt` is `None` when the live call was not made at all.
fn resolve<T>(
    resource: &'static str,
    attempt: Option<Result<Vec<T>>>,
    synthesize: impl FnOnce() -> Vec<T>,
) -> Resolved<T> {
    match attempt {
        Some(Ok(offers)) if !offers.is_empty() => {
            info!(resource, count = offers.len(), "Using live marketplace offers");
            return Resolved { offers, live: true };
        }
        Some(Ok(_)) => warn!(resource, "Marketplace returned no offers, using estimates"),
        Some(Err(e)) => warn!(resource, error = %e, "Marketplace lookup failed, using estimates"),
        None => debug!(resource, "Live lookup skipped, using estimates"),
    }

    Resolved {
        offers: synthesize(),
        live: false,
    }
}

/// Runs one trip search end to end
pub struct TripAggregator {
    marketplace: Option<Arc<dyn MarketplaceProvider>>,
    session: Option<Arc<CredentialSession>>,
    recommender: Recommender,
}

impl TripAggregator {
    #[must_use]
    pub fn new(marketplace: Option<Arc<dyn MarketplaceProvider>>, recommender: Recommender) -> Self {
        Self {
            marketplace,
            session: None,
            recommender,
        }
    }

    /// Wire up the live clients that have credentials; missing credentials are not an error
    pub fn from_config(config: &TripMindConfig) -> Result<Self> {
        let (marketplace, session) = if config.marketplace.is_configured() {
            let client = MarketplaceClient::from_config(&config.marketplace)?;
            let session = Arc::clone(client.session());
            let provider: Arc<dyn MarketplaceProvider> = Arc::new(client);
            (Some(provider), Some(session))
        } else {
            info!("Marketplace credentials not set, all results will be estimated");
            (None, None)
        };

        let generator: Option<Arc<dyn TextGenerator>> = if config.assistant.is_configured() {
            let client = HuggingFaceClient::new(&config.assistant)?;
            info!(endpoint = client.endpoint(), "AI recommendations enabled");
            Some(Arc::new(client))
        } else {
            info!("AI API key not set, recommendations will use the price heuristic");
            None
        };

        Ok(Self {
            marketplace,
            session,
            recommender: Recommender::new(generator),
        })
    }

    /// Pre-fetch a marketplace token if a live session exists
    pub async fn warm_up(&self) {
        if let Some(session) = &self.session {
            session.warm_up().await;
        }
    }

    /// Resolve flights, then hotels, then the recommendation.
    ///
    /// Hotels are only looked up live when flights resolved live. The outcome is
    /// `live` only when both did.
    #[instrument(skip(self, request), fields(origin = %request.origin, destination = %request.destination))]
    pub async fn search(&self, request: &TripRequest) -> SearchOutcome {
        let flight_attempt = match &self.marketplace {
            Some(marketplace) => Some(marketplace.search_flights(request).await),
            None => None,
        };
        let flights = resolve("flights", flight_attempt, || {
            synthesize_flights(
                &request.origin,
                &request.destination,
                request.departure_date,
                request.return_date,
            )
        });

        let hotel_attempt = match &self.marketplace {
            Some(marketplace) if flights.live => Some(marketplace.search_hotels(request).await),
            _ => None,
        };
        let hotels = resolve("hotels", hotel_attempt, || {
            synthesize_hotels(&request.destination)
        });

        let source = Provenance::from_resolution(flights.live, hotels.live);

        let recommendation = self
            .recommender
            .recommend(request, &flights.offers, &hotels.offers, source.is_estimated())
            .await;

        info!(%source, flights = flights.offers.len(), hotels = hotels.offers.len(), "Search complete");

        SearchOutcome::new(flights.offers, hotels.offers, source, recommendation)
    }
}

impl std::fmt::Debug for TripAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripAggregator")
            .field("marketplace", &self.marketplace.is_some())
            .finish_non_exhaustive()
    }
}
