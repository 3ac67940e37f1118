//! Error types and handling for `TripMind`

use thiserror::Error;

/// Main error type for the `TripMind` aggregation layer
#[derive(Error, Debug)]
pub enum TripMindError {
    /// Credential exchange with the marketplace failed
    #[error("Authentication error: {message}")]
    Auth { message: String },

    /// Non-2xx response from the marketplace or AI provider
    #[error("Provider error ({status}): {body}")]
    Provider { status: u16, body: String },

    /// Malformed or schema-mismatched response body
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// The marketplace returned zero candidates at an intermediate stage
    #[error("No inventory: {message}")]
    NoInventory { message: String },

    /// AI provider unusable or returned nothing
    #[error("AI error: {message}")]
    Ai { message: String },

    /// The AI model is still loading on the provider side
    #[error("AI model is loading, please retry in a few seconds")]
    AiColdStart,

    /// Nothing to recommend from
    #[error("No flight or hotel candidates to recommend from")]
    EmptyInput,

    /// Transport failure or timeout of an outbound call
    #[error("Network error: {message}")]
    Network { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl TripMindError {
    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn provider<S: Into<String>>(status: u16, body: S) -> Self {
        Self::Provider {
            status,
            body: body.into(),
        }
    }

    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn no_inventory<S: Into<String>>(message: S) -> Self {
        Self::NoInventory {
            message: message.into(),
        }
    }

    pub fn ai<S: Into<String>>(message: S) -> Self {
        Self::Ai {
            message: message.into(),
        }
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripMindError::Auth { .. } | TripMindError::Provider { .. } => {
                "Live travel data is unavailable right now; showing estimated prices.".to_string()
            }
            TripMindError::Parse { .. } => {
                "Received unexpected data from a travel provider.".to_string()
            }
            TripMindError::NoInventory { message } => format!("No availability: {message}"),
            TripMindError::Ai { .. } | TripMindError::AiColdStart => {
                "AI recommendations are unavailable; using a price-based pick instead.".to_string()
            }
            TripMindError::EmptyInput => {
                "Unable to provide recommendations at this time.".to_string()
            }
            TripMindError::Network { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            TripMindError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for TripMindError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TripMindError::parse(err.to_string())
        } else if let Some(status) = err.status() {
            TripMindError::provider(status.as_u16(), err.to_string())
        } else {
            TripMindError::network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TripMindError {
    fn from(err: serde_json::Error) -> Self {
        TripMindError::parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let auth_err = TripMindError::auth("invalid_client");
        assert!(matches!(auth_err, TripMindError::Auth { .. }));

        let provider_err = TripMindError::provider(500, "boom");
        assert!(matches!(
            provider_err,
            TripMindError::Provider { status: 500, .. }
        ));

        let inventory_err = TripMindError::no_inventory("PAR");
        assert!(matches!(inventory_err, TripMindError::NoInventory { .. }));
    }

    #[test]
    fn test_provider_display_carries_status_and_body() {
        let err = TripMindError::provider(429, "Too many requests");
        assert_eq!(err.to_string(), "Provider error (429): Too many requests");
    }

    #[test]
    fn test_user_messages() {
        assert!(
            TripMindError::auth("x")
                .user_message()
                .contains("estimated prices")
        );
        assert_eq!(
            TripMindError::EmptyInput.user_message(),
            "Unable to provide recommendations at this time."
        );
        assert!(
            TripMindError::no_inventory("LON")
                .user_message()
                .contains("LON")
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: TripMindError = json_err.into();
        assert!(matches!(err, TripMindError::Parse { .. }));
    }
}
