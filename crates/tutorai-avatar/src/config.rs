//! Pipeline configuration
//!
//! Loaded from the environment (and a `.env` file when present).

use std::time::Duration;

use crate::domain::errors::DomainError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_MODEL: &str = "AVATAR_MODEL";
pub const ENV_BASE_URL: &str = "AVATAR_API_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "AVATAR_TIMEOUT_SECS";

/// Settings for the upstream generative API
#[derive(Clone)]
pub struct PipelineConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Applies to the whole request, connect included
    pub timeout: Duration,
}

impl PipelineConfig {
    /// Create a configuration with defaults for everything but the key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load from process environment, reading `.env` first if present
    pub fn from_env() -> Result<Self, DomainError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {:?}", path);
        }
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = present(ENV_API_KEY).ok_or_else(|| DomainError::missing_env(ENV_API_KEY))?;
        let mut config = Self::new(api_key);

        if let Some(model) = present(ENV_MODEL) {
            config = config.with_model(model);
        }
        if let Some(base_url) = present(ENV_BASE_URL) {
            config = config.with_base_url(base_url);
        }
        if let Some(raw) = present(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                DomainError::Config(format!("{} must be a whole number of seconds", ENV_TIMEOUT_SECS))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Override the model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Endpoint without the key, safe to log
    pub fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }
}

impl std::fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
