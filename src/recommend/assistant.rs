//! Hugging Face inference client behind the `TextGenerator` seam

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::AssistantConfig;
use crate::{Result, TripMindError};

/// Anything that turns a prompt into generated text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

pub struct HuggingFaceClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
    max_new_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f64,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct Generation {
    #[serde(default)]
    generated_text: String,
}

impl HuggingFaceClient {
    pub fn new(config: &AssistantConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("TripMind/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripMindError::config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            endpoint: format!("{}/{}", config.base_url.trim_end_matches('/'), config.model),
            max_new_tokens: config.max_new_tokens,
            temperature: config.temperature,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceClient {
    #[instrument(skip(self, prompt), fields(endpoint = %self.endpoint))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| TripMindError::ai("Hugging Face API key not configured"))?;

        let body = InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                max_new_tokens: self.max_new_tokens,
                temperature: self.temperature,
                return_full_text: false,
            },
        };

        debug!("Sending {} prompt characters to the model", prompt.len());

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TripMindError::ai(format!("inference request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(TripMindError::AiColdStart);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TripMindError::ai(format!("failed to read inference response: {e}")))?;

        if !status.is_success() {
            return Err(TripMindError::ai(format!(
                "inference API error ({}): {}",
                status.as_u16(),
                String::from_utf8_lossy(&bytes)
            )));
        }

        let text = parse_generation(&bytes)?;
        info!("Received {} characters of generated text", text.len());
        Ok(text)
    }
}

/// First generated text of an inference response
fn parse_generation(body: &[u8]) -> Result<String> {
    let generations: Vec<Generation> = serde_json::from_slice(body)
        .map_err(|e| TripMindError::ai(format!("failed to parse AI response: {e}")))?;

    generations
        .into_iter()
        .next()
        .map(|g| g.generated_text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| TripMindError::ai("empty response from AI"))
}
