//! OAuth2 client-credentials session for the marketplace API
//!
//! One session is built per process and shared by reference. The cached token is
//! guarded by a single async mutex that is only held to check freshness and to store
//! a new token, never across the exchange itself. Overlapping refreshes are allowed;
//! the last one to finish wins.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use oauth2::basic::{BasicClient, BasicErrorResponse};
use oauth2::reqwest::async_http_client;
use oauth2::{AuthType, AuthUrl, ClientId, ClientSecret, RequestTokenError, TokenResponse, TokenUrl};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::config::MarketplaceConfig;
use crate::{Result, TripMindError};

const TOKEN_PATH: &str = "/v1/security/oauth2/token";

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Usable only strictly before `expires_at - margin`
    fn is_fresh(&self, now: DateTime<Utc>, margin: TimeDelta) -> bool {
        now + margin < self.expires_at
    }
}

/// Bearer token cache with refresh-on-demand
pub struct CredentialSession {
    oauth: BasicClient,
    margin: TimeDelta,
    timeout: Duration,
    cache: Mutex<Option<CachedToken>>,
}

impl CredentialSession {
    /// Build a session from marketplace settings.
    ///
    /// Fails with a configuration error when credentials are missing or the
    /// base URL cannot be turned into a token endpoint.
    pub fn new(config: &MarketplaceConfig) -> Result<Self> {
        let (client_id, client_secret) = config
            .credentials()
            .ok_or_else(|| TripMindError::config("marketplace client id and secret are required"))?;

        let token_endpoint = format!("{}{}", config.api_base_url(), TOKEN_PATH);
        let token_url = TokenUrl::new(token_endpoint.clone())
            .map_err(|e| TripMindError::config(format!("invalid token url {token_endpoint}: {e}")))?;
        // client-credentials never visits the authorize endpoint
        let auth_url = AuthUrl::new(token_endpoint.clone())
            .map_err(|e| TripMindError::config(format!("invalid token url {token_endpoint}: {e}")))?;

        let oauth = BasicClient::new(
            ClientId::new(client_id.to_string()),
            Some(ClientSecret::new(client_secret.to_string())),
            auth_url,
            Some(token_url),
        )
        .set_auth_type(AuthType::RequestBody);

        Ok(Self {
            oauth,
            margin: TimeDelta::seconds(i64::from(config.token_margin_seconds)),
            timeout: config.timeout(),
            cache: Mutex::new(None),
        })
    }

    /// Return a currently valid bearer token, refreshing it if needed
    pub async fn acquire(&self) -> Result<String> {
        self.acquire_at(Utc::now()).await
    }

    async fn acquire_at(&self, now: DateTime<Utc>) -> Result<String> {
        {
            let cache = self.cache.lock().await;
            if let Some(token) = cache.as_ref().filter(|t| t.is_fresh(now, self.margin)) {
                return Ok(token.access_token.clone());
            }
        }

        let fresh = self.exchange(now).await?;
        let access_token = fresh.access_token.clone();
        *self.cache.lock().await = Some(fresh);

        Ok(access_token)
    }

    /// Fetch a token once at start-up so the first search does not pay for it
    pub async fn warm_up(&self) {
        match self.acquire().await {
            Ok(_) => info!("Marketplace credentials verified"),
            Err(e) => warn!(error = %e, "Marketplace token warm-up failed"),
        }
    }

    #[instrument(level = "debug", skip(self))]
    async fn exchange(&self, issued_at: DateTime<Utc>) -> Result<CachedToken> {
        debug!("Requesting marketplace access token");

        let request = self
            .oauth
            .exchange_client_credentials()
            .request_async(async_http_client);

        let response = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| {
                TripMindError::auth(format!(
                    "token exchange timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(token_error)?;

        let expires_at = issued_at + token_lifetime(response.expires_in());

        debug!(%expires_at, "Marketplace access token refreshed");

        Ok(CachedToken {
            access_token: response.access_token().secret().clone(),
            expires_at,
        })
    }

    #[cfg(test)]
    async fn seed(&self, access_token: &str, expires_at: DateTime<Utc>) {
        *self.cache.lock().await = Some(CachedToken {
            access_token: access_token.to_string(),
            expires_at,
        });
    }
}

/// A token without a usable `expires_in` is never fresh, so every call refreshes it
fn token_lifetime(expires_in: Option<Duration>) -> TimeDelta {
    match expires_in.and_then(|d| TimeDelta::from_std(d).ok()) {
        Some(lifetime) => lifetime,
        None => {
            warn!("Token response has no expires_in, the token will not be reused");
            TimeDelta::zero()
        }
    }
}

fn token_error<RE>(err: RequestTokenError<RE, BasicErrorResponse>) -> TripMindError
where
    RE: std::error::Error + 'static,
{
    match err {
        RequestTokenError::ServerResponse(response) => {
            TripMindError::auth(format!("credentials rejected: {response}"))
        }
        RequestTokenError::Request(e) => TripMindError::auth(format!("token request failed: {e}")),
        RequestTokenError::Parse(e, _) => {
            TripMindError::auth(format!("malformed token response: {e}"))
        }
        RequestTokenError::Other(message) => TripMindError::auth(message),
    }
}
