//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DomainError {
    pub fn missing_env<T: AsRef<str>>(name: T) -> Self {
        Self::Config(format!("{} is not set", name.as_ref()))
    }
}

/// Failures of the outbound generative-language call
///
/// These never reach pipeline callers as errors; the client renders them
/// into text (see [`crate::ports::Generation`]).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unexpected response format from Gemini API")]
    MalformedEnvelope,
}

impl UpstreamError {
    /// Text the avatar speaks in place of a model reply
    pub fn to_reply(&self) -> String {
        format!("Error: {}", self)
    }
}
