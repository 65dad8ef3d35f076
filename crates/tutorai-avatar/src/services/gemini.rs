//! Gemini provider for the avatar pipeline.
//!
//! Single `generateContent` round trip; no retries.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::config::PipelineConfig;
use crate::domain::errors::{DomainError, UpstreamError};
use crate::ports::GenerativeProvider;

const PROVIDER_NAME: &str = "google";

/// Gemini-backed [`GenerativeProvider`]
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    config: PipelineConfig,
}

impl GeminiProvider {
    /// Build a provider; the HTTP client carries the configured timeout.
    pub fn new(config: PipelineConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| DomainError::Config(format!("HTTP client: {}", err)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}

#[async_trait]
impl GenerativeProvider for GeminiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        tracing::info!(
            endpoint = %self.config.endpoint(),
            prompt_chars = prompt.len(),
            "Calling Gemini API"
        );

        let response = self
            .client
            .post(self.config.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body));
        }

        let payload: Value = response.json().await.map_err(|err| {
            let err = err.without_url();
            if err.is_timeout() {
                UpstreamError::Timeout(err.to_string())
            } else {
                UpstreamError::Parse(err.to_string())
            }
        })?;

        match extract_text(&payload) {
            Some(text) => {
                tracing::info!("Gemini API call successful");
                Ok(text)
            }
            None => {
                tracing::warn!("Unexpected response format from Gemini API: {}", payload);
                Err(UpstreamError::MalformedEnvelope)
            }
        }
    }

    fn provider_name(&self) -> &str {
        PROVIDER_NAME
    }

    fn model_id(&self) -> &str {
        &self.config.model
    }
}

// ============================================
// Request Types
// ============================================

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

// ============================================
// Helper Functions
// ============================================

/// Concatenate every part's text of the first candidate
fn extract_text(root: &Value) -> Option<String> {
    let parts = root
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;

    if parts.is_empty() {
        return None;
    }

    Some(
        parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect(),
    )
}

/// The request URL carries the API key, so it is stripped before the error is spoken or logged
fn map_transport_error(err: reqwest::Error) -> UpstreamError {
    let err = err.without_url();
    if err.is_timeout() {
        UpstreamError::Timeout(err.to_string())
    } else {
        UpstreamError::Transport(err.to_string())
    }
}

fn map_http_error(status: StatusCode, body: String) -> UpstreamError {
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or(body);

    UpstreamError::Status {
        status: status.as_u16(),
        message,
    }
}
