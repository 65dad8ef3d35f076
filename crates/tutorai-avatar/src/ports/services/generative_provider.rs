//! Generative Provider Port
//!
//! Abstract interface for the generative-language API the avatar speaks
//! through. One prompt in, one block of text out.

use async_trait::async_trait;

use crate::domain::errors::UpstreamError;

/// Outcome of an upstream call
///
/// Upstream failures are an expected condition, not a fault: they arrive
/// here as `Degraded` and are spoken as an error sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// Model output, passed through untouched
    Text(String),
    /// The call failed; the error is rendered as the reply
    Degraded(UpstreamError),
}

impl Generation {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Generation::Degraded(_))
    }

    /// Text to hand back to the caller
    pub fn into_text(self) -> String {
        match self {
            Generation::Text(text) => text,
            Generation::Degraded(err) => err.to_reply(),
        }
    }
}

impl From<Result<String, UpstreamError>> for Generation {
    fn from(result: Result<String, UpstreamError>) -> Self {
        match result {
            Ok(text) => Generation::Text(text),
            Err(err) => Generation::Degraded(err),
        }
    }
}

/// Generative-language provider
///
/// # Example
///
/// ```rust,ignore
/// use tutorai_avatar::ports::GenerativeProvider;
///
/// struct GeminiProvider { /* ... */ }
///
/// #[async_trait]
/// impl GenerativeProvider for GeminiProvider {
///     async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
///         // POST {base_url}/{model}:generateContent
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Send one prompt and return the model's text
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError>;

    /// Send one prompt; failures are logged and degraded to text
    async fn invoke(&self, prompt: &str) -> Generation {
        let outcome = Generation::from(self.generate(prompt).await);
        if let Generation::Degraded(err) = &outcome {
            tracing::error!(
                provider = self.provider_name(),
                model = self.model_id(),
                "Error calling generative API: {}",
                err
            );
        }
        outcome
    }

    /// Provider name (e.g., "google")
    fn provider_name(&self) -> &str;

    /// Model ID being used
    fn model_id(&self) -> &str;
}

// Note: incremental streaming would be a `generate_stream` returning a
// `futures::Stream` of text chunks; the pipeline facade keeps its contract
// and currently always delivers complete text.

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProvider(Result<String, UpstreamError>);

    #[async_trait]
    impl GenerativeProvider for FixedProvider {
        async fn generate(&self, _prompt: &str) -> Result<String, UpstreamError> {
            self.0.clone()
        }

        fn provider_name(&self) -> &str {
            "fixed"
        }

        fn model_id(&self) -> &str {
            "fixed-1"
        }
    }

    #[tokio::test]
    async fn test_invoke_passes_text_through() {
        let provider = FixedProvider(Ok("{\"response\": \"hi\"}".to_string()));
        let outcome = provider.invoke("prompt").await;
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.into_text(), "{\"response\": \"hi\"}");
    }

    #[tokio::test]
    async fn test_invoke_degrades_transport_failure() {
        let provider = FixedProvider(Err(UpstreamError::Transport(
            "connection refused".to_string(),
        )));
        let outcome = provider.invoke("prompt").await;
        assert!(outcome.is_degraded());
        assert_eq!(outcome.into_text(), "Error: Request failed: connection refused");
    }
}
