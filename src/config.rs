//! Configuration management for `TripMind`
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `TRIPMIND_<SECTION>__<KEY>` environment variables, then the provider-style
//! variables (`AMADEUS_CLIENT_ID`, `HUGGINGFACE_API_KEY`, ...). Missing credentials
//! never fail loading; they only switch the corresponding live client off.

use crate::TripMindError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for `TripMind`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripMindConfig {
    /// Flight and hotel marketplace settings
    #[serde(default)]
    pub marketplace: MarketplaceConfig,
    /// AI text-generation settings
    #[serde(default)]
    pub assistant: AssistantConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Marketplace (Amadeus) API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceConfig {
    /// `test` or `production`; selects the base URL
    #[serde(default = "default_marketplace_environment")]
    pub environment: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Overrides the environment's base URL
    pub base_url: Option<String>,
    /// Request timeout in seconds, also applied to the token exchange
    #[serde(default = "default_marketplace_timeout")]
    pub timeout_seconds: u32,
    /// Tokens are refreshed this many seconds before they expire
    #[serde(default = "default_token_margin")]
    pub token_margin_seconds: u32,
    #[serde(default = "default_max_flight_offers")]
    pub max_flight_offers: u32,
    /// Hotel ids forwarded to the offers lookup
    #[serde(default = "default_max_hotel_ids")]
    pub max_hotel_ids: u32,
    #[serde(default = "default_hotel_radius")]
    pub hotel_radius_km: u32,
    /// Settlement currency for prices
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// AI provider (Hugging Face inference) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_assistant_base_url")]
    pub base_url: String,
    #[serde(default = "default_assistant_timeout")]
    pub timeout_seconds: u32,
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

const TEST_BASE_URL: &str = "https://test.api.amadeus.com";
const PRODUCTION_BASE_URL: &str = "https://api.amadeus.com";

/// Provider-conventional variables and the keys they override
const LEGACY_VARIABLES: [(&str, &str); 5] = [
    ("AMADEUS_ENV", "marketplace.environment"),
    ("AMADEUS_CLIENT_ID", "marketplace.client_id"),
    ("AMADEUS_CLIENT_SECRET", "marketplace.client_secret"),
    ("HF_MODEL", "assistant.model"),
    ("HUGGINGFACE_API_KEY", "assistant.api_key"),
];

// Default value functions
fn default_marketplace_environment() -> String {
    "test".to_string()
}

fn default_marketplace_timeout() -> u32 {
    30
}

fn default_token_margin() -> u32 {
    30
}

fn default_max_flight_offers() -> u32 {
    6
}

fn default_max_hotel_ids() -> u32 {
    20
}

fn default_hotel_radius() -> u32 {
    5
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_model() -> String {
    "mistralai/Mistral-7B-Instruct-v0.3".to_string()
}

fn default_assistant_base_url() -> String {
    "https://api-inference.huggingface.co/models".to_string()
}

fn default_assistant_timeout() -> u32 {
    60
}

fn default_max_new_tokens() -> u32 {
    400
}

fn default_temperature() -> f64 {
    0.6
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            environment: default_marketplace_environment(),
            client_id: None,
            client_secret: None,
            base_url: None,
            timeout_seconds: default_marketplace_timeout(),
            token_margin_seconds: default_token_margin(),
            max_flight_offers: default_max_flight_offers(),
            max_hotel_ids: default_max_hotel_ids(),
            hotel_radius_km: default_hotel_radius(),
            currency: default_currency(),
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_assistant_base_url(),
            timeout_seconds: default_assistant_timeout(),
            max_new_tokens: default_max_new_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl MarketplaceConfig {
    /// Both client id and secret are set and non-blank
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }

    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let id = self.client_id.as_deref().filter(|s| !s.trim().is_empty())?;
        let secret = self
            .client_secret
            .as_deref()
            .filter(|s| !s.trim().is_empty())?;
        Some((id, secret))
    }

    /// Explicit base URL, or the one belonging to the selected environment
    #[must_use]
    pub fn api_base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None if self.environment == "production" => PRODUCTION_BASE_URL.to_string(),
            None => TEST_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl AssistantConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl TripMindConfig {
    /// Load configuration from an optional path, the default file and environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let vars: config::Map<String, String> = std::env::vars().collect();
        Self::load_with_env(config_path, &vars)
    }

    fn load_with_env(
        config_path: Option<PathBuf>,
        vars: &config::Map<String, String>,
    ) -> Result<Self> {
        let mut builder = Config::builder();

        // An explicit path must exist; the default location is optional
        match config_path {
            Some(path) => {
                builder = builder.add_source(
                    File::from(path)
                        .required(true)
                        .format(config::FileFormat::Toml),
                );
            }
            None => {
                if let Some(path) = Self::get_config_path().filter(|p| p.exists()) {
                    builder = builder.add_source(
                        File::from(path)
                            .required(false)
                            .format(config::FileFormat::Toml),
                    );
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("TRIPMIND")
                .prefix_separator("_")
                .separator("__")
                .ignore_empty(true)
                .source(Some(vars.clone())),
        );

        for (variable, key) in LEGACY_VARIABLES {
            let value = vars
                .get(variable)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
            builder = builder
                .set_override_option(key, value)
                .with_context(|| format!("Failed to apply {variable}"))?;
        }

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TripMindConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripmind").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.marketplace.environment.is_empty() {
            self.marketplace.environment = default_marketplace_environment();
        }
        if self.marketplace.timeout_seconds == 0 {
            self.marketplace.timeout_seconds = default_marketplace_timeout();
        }
        if self.marketplace.max_flight_offers == 0 {
            self.marketplace.max_flight_offers = default_max_flight_offers();
        }
        if self.marketplace.max_hotel_ids == 0 {
            self.marketplace.max_hotel_ids = default_max_hotel_ids();
        }
        if self.marketplace.hotel_radius_km == 0 {
            self.marketplace.hotel_radius_km = default_hotel_radius();
        }
        if self.marketplace.currency.is_empty() {
            self.marketplace.currency = default_currency();
        }
        if self.assistant.model.is_empty() {
            self.assistant.model = default_model();
        }
        if self.assistant.base_url.is_empty() {
            self.assistant.base_url = default_assistant_base_url();
        }
        if self.assistant.timeout_seconds == 0 {
            self.assistant.timeout_seconds = default_assistant_timeout();
        }
        if self.assistant.max_new_tokens == 0 {
            self.assistant.max_new_tokens = default_max_new_tokens();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_credentials()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Credentials are optional, but blank values are almost always a mistake
    fn validate_credentials(&self) -> Result<()> {
        let fields = [
            ("Marketplace client id", &self.marketplace.client_id),
            ("Marketplace client secret", &self.marketplace.client_secret),
            ("AI API key", &self.assistant.api_key),
        ];

        for (name, value) in fields {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(TripMindError::config(format!(
                    "{name} cannot be empty if provided. Either remove it or provide a valid value."
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.marketplace.timeout_seconds > 300 {
            return Err(
                TripMindError::config("Marketplace timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.assistant.timeout_seconds > 300 {
            return Err(TripMindError::config("AI timeout cannot exceed 300 seconds").into());
        }

        if self.marketplace.token_margin_seconds > 600 {
            return Err(
                TripMindError::config("Token margin cannot exceed 600 seconds").into(),
            );
        }

        if self.marketplace.max_flight_offers > 250 {
            return Err(
                TripMindError::config("Maximum flight offers cannot exceed 250").into(),
            );
        }

        if self.marketplace.max_hotel_ids > 100 {
            return Err(TripMindError::config("Maximum hotel ids cannot exceed 100").into());
        }

        if !(0.0..=2.0).contains(&self.assistant.temperature) {
            return Err(
                TripMindError::config("AI temperature must be between 0.0 and 2.0").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_environments = ["test", "production"];
        if !valid_environments.contains(&self.marketplace.environment.as_str()) {
            return Err(TripMindError::config(format!(
                "Invalid marketplace environment '{}'. Must be one of: {}",
                self.marketplace.environment,
                valid_environments.join(", ")
            ))
            .into());
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripMindError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripMindError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let urls = [
            ("Marketplace base URL", self.marketplace.api_base_url()),
            ("AI base URL", self.assistant.base_url.clone()),
        ];
        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TripMindError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
