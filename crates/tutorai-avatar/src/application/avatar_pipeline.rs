//! Avatar Pipeline (Use Case)
//!
//! Entry points the host chat application calls: normalize the input,
//! compose the persona prompt, call the provider, hand back its text.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::Instrument;
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::domain::errors::DomainError;
use crate::domain::services::{compose_prompt, extract_persona_key, normalize};
use crate::domain::value_objects::PersonaKey;
use crate::domain::Persona;
use crate::ports::GenerativeProvider;
use crate::services::gemini::GeminiProvider;

/// Display name, also the reply to title-generation requests
pub const PIPELINE_NAME: &str = "Avatar Backend Pipeline";

/// Stateless pipeline facade; safe to share across concurrent calls
pub struct AvatarPipeline<P: GenerativeProvider> {
    provider: Arc<P>,
}

impl AvatarPipeline<GeminiProvider> {
    /// Pipeline backed by Gemini
    pub fn from_config(config: PipelineConfig) -> Result<Self, DomainError> {
        Ok(Self::new(Arc::new(GeminiProvider::new(config)?)))
    }
}

impl<P: GenerativeProvider> AvatarPipeline<P> {
    pub fn new(provider: Arc<P>) -> Self {
        tracing::info!("{} initialized", PIPELINE_NAME);
        Self { provider }
    }

    pub fn name(&self) -> &'static str {
        PIPELINE_NAME
    }

    pub fn model_id(&self) -> &str {
        self.provider.model_id()
    }

    /// Called by the host when the server starts
    pub async fn on_startup(&self) {
        tracing::info!(model = self.model_id(), "{} started", PIPELINE_NAME);
    }

    /// Called by the host when the server stops
    pub async fn on_shutdown(&self) {
        tracing::info!("{} shutdown", PIPELINE_NAME);
    }

    /// Single-shot entry point used by the host chat UI.
    ///
    /// `body` is the full request body. When it carries `"title": true` the
    /// host only wants a conversation label and no model call is made.
    pub async fn pipe(
        &self,
        user_message: &str,
        model_id: &str,
        messages: &[Value],
        body: &Value,
    ) -> String {
        let span = tracing::info_span!("pipe", invocation = %Uuid::new_v4(), model_id);

        async {
            tracing::info!("Received input: {}", user_message);

            if is_title_request(body) {
                tracing::info!("Title generation");
                return PIPELINE_NAME.to_string();
            }

            let persona = extract_persona_key(&json!({ "messages": messages }), Some(body));
            self.respond(user_message, persona).await
        }
        .instrument(span)
        .await
    }

    /// Generic entry point accepting any supported input shape.
    ///
    /// `stream` is accepted for interface compatibility; the complete text is
    /// always returned.
    pub async fn run(&self, input: &Value, stream: bool) -> String {
        let span = tracing::info_span!("run", invocation = %Uuid::new_v4(), stream);

        async {
            tracing::info!("Received input: {}", input);
            let normalized = normalize(input, None);
            tracing::debug!("Extracted input text: {}", normalized.utterance);
            self.respond(&normalized.utterance, normalized.persona).await
        }
        .instrument(span)
        .await
    }

    async fn respond(&self, utterance: &str, persona: PersonaKey) -> String {
        let gender = Persona::get(persona).gender;
        tracing::info!(avatar_type = %persona, %gender, "Using avatar persona");

        let prompt = compose_prompt(utterance, persona);
        self.provider.invoke(&prompt).await.into_text()
    }
}

fn is_title_request(body: &Value) -> bool {
    body.get("title").and_then(Value::as_bool).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::UpstreamError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingProvider {
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingProvider {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl GenerativeProvider for RecordingProvider {
        async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                Err(UpstreamError::Transport("connection reset".to_string()))
            } else {
                Ok(r#"{"response": "Happy to help with that question!"}"#.to_string())
            }
        }

        fn provider_name(&self) -> &str {
            "recording"
        }

        fn model_id(&self) -> &str {
            "recording-1"
        }
    }

    fn pipeline() -> (Arc<RecordingProvider>, AvatarPipeline<RecordingProvider>) {
        let provider = Arc::new(RecordingProvider::default());
        (provider.clone(), AvatarPipeline::new(provider))
    }

    #[tokio::test]
    async fn test_title_request_skips_provider() {
        let (provider, pipeline) = pipeline();
        let messages = vec![json!({"role": "user", "content": "Name this chat"})];

        let reply = pipeline
            .pipe("Name this chat", "avatar", &messages, &json!({"title": true}))
            .await;

        assert_eq!(reply, PIPELINE_NAME);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_pipe_uses_body_persona_and_user_message() {
        let (provider, pipeline) = pipeline();
        let messages = vec![json!({"role": "user", "content": "from history"})];
        let body = json!({"avatar_type": "MENTOR", "title": false});

        let reply = pipeline
            .pipe("What is a prime number?", "avatar", &messages, &body)
            .await;

        assert_eq!(reply, r#"{"response": "Happy to help with that question!"}"#);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        let prompt = provider.last_prompt();
        assert!(prompt.starts_with(Persona::get(PersonaKey::Mentor).instruction));
        assert!(prompt.ends_with("What is a prime number?"));
        assert!(prompt.contains("\"F_Dances_001\""));
    }

    #[tokio::test]
    async fn test_pipe_reads_persona_from_message_metadata() {
        let (provider, pipeline) = pipeline();
        let messages = vec![
            json!({"role": "user", "content": "hi", "metadata": {"avatar_type": "innovator"}}),
            json!({"role": "user", "content": "tell me more"}),
        ];

        pipeline.pipe("tell me more", "avatar", &messages, &json!({})).await;

        assert!(provider
            .last_prompt()
            .starts_with(Persona::get(PersonaKey::Innovator).instruction));
    }

    #[tokio::test]
    async fn test_run_coach_scenario() {
        let (provider, pipeline) = pipeline();
        let input = json!({"messages": [{"role": "user", "content": "Hello"}], "avatar_type": "coach"});

        pipeline.run(&input, false).await;

        let prompt = provider.last_prompt();
        assert!(prompt.starts_with(Persona::get(PersonaKey::Coach).instruction));
        assert!(prompt.contains("\"F_Walk_001\""));
        assert!(prompt.ends_with("The user's question is: Hello"));
    }

    #[tokio::test]
    async fn test_run_bare_string_uses_default_persona() {
        let (provider, pipeline) = pipeline();

        pipeline.run(&json!("Tell me about gravity"), true).await;

        let prompt = provider.last_prompt();
        assert!(prompt.starts_with(Persona::get(PersonaKey::Default).instruction));
        assert!(prompt.contains("\"M_Standing_Idle_001\""));
        assert!(!prompt.contains("\"F_"));
        assert!(prompt.ends_with("Tell me about gravity"));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_spoken_not_raised() {
        let provider = Arc::new(RecordingProvider::failing());
        let pipeline = AvatarPipeline::new(provider.clone());

        let reply = pipeline.run(&json!([{"role": "user", "content": "hi"}]), false).await;

        assert_eq!(reply, "Error: Request failed: connection reset");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_runs_are_independent() {
        let (provider, pipeline) = pipeline();
        let pipeline = Arc::new(pipeline);

        let handles: Vec<_> = ["scholar", "coach", "mentor", "wizard"]
            .into_iter()
            .map(|key| {
                let pipeline = pipeline.clone();
                tokio::spawn(async move {
                    pipeline
                        .run(&json!({"content": "hi", "avatar_type": key}), false)
                        .await
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().contains("Happy to help"));
        }
        assert_eq!(provider.calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_title_flag_must_be_true() {
        assert!(is_title_request(&json!({"title": true})));
        assert!(!is_title_request(&json!({"title": false})));
        assert!(!is_title_request(&json!({})));
        assert!(!is_title_request(&json!("title")));
    }
}
