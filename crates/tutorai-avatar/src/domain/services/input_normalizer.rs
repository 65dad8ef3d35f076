//! Input Normalizer
//!
//! Extracts the user's utterance and the requested persona from whatever
//! payload shape the host chat application sends. Never fails: the worst
//! case is the stringified payload spoken by the default persona.

use serde_json::Value;

use crate::domain::entities::{ChatInput, InputMessage, NormalizedInput};
use crate::domain::value_objects::PersonaKey;

const AVATAR_TYPE_FIELD: &str = "avatar_type";

/// Extract the user's utterance from any accepted input shape
pub fn extract_utterance(input: &Value) -> String {
    let extracted = match ChatInput::classify(input) {
        ChatInput::Text(text) => Some(text.to_string()),
        ChatInput::Conversation(messages) | ChatInput::Messages(messages) => {
            last_user_content(&messages)
        }
        ChatInput::Content(content) => Some(content_text(content)),
        ChatInput::Other => None,
    };

    extracted.unwrap_or_else(|| stringify(input))
}

/// Extract the persona key.
///
/// Sources in order: `avatar_type` on the side-channel `body`, `avatar_type`
/// on the input object, then `metadata.avatar_type` of the latest message
/// carrying metadata. A source declaring `default` defers to the next one.
pub fn extract_persona_key(input: &Value, body: Option<&Value>) -> PersonaKey {
    let declared = body
        .and_then(declared_avatar_type)
        .or_else(|| declared_avatar_type(input))
        .or_else(|| {
            ChatInput::classify(input)
                .messages()
                .iter()
                .rev()
                .find(|message| message.metadata.is_some())
                .and_then(InputMessage::avatar_type)
                .and_then(non_default)
        });

    declared
        .map(|raw| PersonaKey::resolve(&raw))
        .unwrap_or_default()
}

/// Normalize a payload in one pass
pub fn normalize(input: &Value, body: Option<&Value>) -> NormalizedInput {
    NormalizedInput {
        utterance: extract_utterance(input),
        persona: extract_persona_key(input, body),
    }
}

fn last_user_content(messages: &[InputMessage]) -> Option<String> {
    messages
        .iter()
        .rev()
        .filter(|message| message.is_user())
        .find_map(|message| message.content.as_ref())
        .map(content_text)
}

fn content_text(content: &Value) -> String {
    match content {
        Value::String(text) => text.clone(),
        other => stringify(other),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn declared_avatar_type(value: &Value) -> Option<String> {
    value
        .get(AVATAR_TYPE_FIELD)
        .and_then(Value::as_str)
        .and_then(non_default)
}

fn non_default(raw: &str) -> Option<String> {
    let key = raw.trim().to_lowercase();
    (!key.is_empty() && key != PersonaKey::Default.as_str()).then_some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shapes(text: &str) -> Vec<Value> {
        vec![
            json!(text),
            json!({"messages": [{"role": "user", "content": text}]}),
            json!({"content": text}),
            json!([{"role": "user", "content": text}]),
        ]
    }

    #[test]
    fn test_utterance_is_shape_invariant() {
        for input in shapes("What is photosynthesis?") {
            assert_eq!(extract_utterance(&input), "What is photosynthesis?", "{input}");
        }
    }

    #[test]
    fn test_backward_scan_filters_by_role() {
        let input = json!({"messages": [
            {"role": "user", "content": "X"},
            {"role": "assistant", "content": "Y"}
        ]});
        assert_eq!(extract_utterance(&input), "X");

        let list = json!([
            {"role": "user", "content": "first"},
            {"role": "assistant", "content": "reply"},
            {"role": "user", "content": "second"},
            {"role": "system", "content": "ignored"}
        ]);
        assert_eq!(extract_utterance(&list), "second");
    }

    #[test]
    fn test_user_message_without_content_is_skipped() {
        let input = json!([
            {"role": "user", "content": "earlier"},
            {"role": "user"}
        ]);
        assert_eq!(extract_utterance(&input), "earlier");
    }

    #[test]
    fn test_fallback_stringifies_whole_input() {
        let no_user = json!({"messages": [{"role": "assistant", "content": "hi"}]});
        assert_eq!(extract_utterance(&no_user), no_user.to_string());

        let unrelated = json!({"prompt": "hello"});
        assert_eq!(extract_utterance(&unrelated), r#"{"prompt":"hello"}"#);

        assert_eq!(extract_utterance(&json!(42)), "42");
        assert_eq!(extract_utterance(&json!([])), "[]");
        assert_eq!(extract_utterance(&Value::Null), "null");
    }

    #[test]
    fn test_messages_key_takes_priority_over_content() {
        let input = json!({"messages": [], "content": "not used"});
        assert_eq!(extract_utterance(&input), input.to_string());
    }

    #[test]
    fn test_non_string_content_is_serialized() {
        let input = json!({"content": ["a", "b"]});
        assert_eq!(extract_utterance(&input), r#"["a","b"]"#);
    }

    #[test]
    fn test_persona_from_input_object() {
        let input = json!({"messages": [{"role": "user", "content": "Hello"}], "avatar_type": "coach"});
        let normalized = normalize(&input, None);
        assert_eq!(normalized.utterance, "Hello");
        assert_eq!(normalized.persona, PersonaKey::Coach);
    }

    #[test]
    fn test_body_wins_over_input() {
        let input = json!({"avatar_type": "scholar"});
        let body = json!({"avatar_type": "Mentor"});
        assert_eq!(extract_persona_key(&input, Some(&body)), PersonaKey::Mentor);
    }

    #[test]
    fn test_default_in_body_defers_to_input() {
        let input = json!({"avatar_type": "innovator"});
        let body = json!({"avatar_type": "default"});
        assert_eq!(extract_persona_key(&input, Some(&body)), PersonaKey::Innovator);
    }

    #[test]
    fn test_unknown_explicit_key_resolves_to_default() {
        let input = json!({
            "avatar_type": "wizard",
            "messages": [{"role": "user", "content": "hi", "metadata": {"avatar_type": "coach"}}]
        });
        assert_eq!(extract_persona_key(&input, None), PersonaKey::Default);
    }

    #[test]
    fn test_persona_from_latest_message_metadata() {
        let input = json!({"messages": [
            {"role": "user", "content": "a", "metadata": {"avatar_type": "scholar"}},
            {"role": "assistant", "content": "b", "metadata": {"avatar_type": "COACH"}},
            {"role": "user", "content": "c"}
        ]});
        assert_eq!(extract_persona_key(&input, None), PersonaKey::Coach);
    }

    #[test]
    fn test_first_metadata_without_avatar_type_stops_scan() {
        let input = json!({"messages": [
            {"role": "user", "content": "a", "metadata": {"avatar_type": "scholar"}},
            {"role": "user", "content": "b", "metadata": {"locale": "fr"}}
        ]});
        assert_eq!(extract_persona_key(&input, None), PersonaKey::Default);
    }

    #[test]
    fn test_bare_string_uses_default_persona() {
        let input = json!("Tell me about gravity");
        let normalized = normalize(&input, None);
        assert_eq!(normalized.utterance, "Tell me about gravity");
        assert_eq!(normalized.persona, PersonaKey::Default);
    }

    #[test]
    fn test_non_string_avatar_type_is_ignored() {
        let body = json!({"avatar_type": 7});
        let input = json!({"avatar_type": "mentor"});
        assert_eq!(extract_persona_key(&input, Some(&body)), PersonaKey::Mentor);
        assert_eq!(extract_persona_key(&json!({}), Some(&json!("coach"))), PersonaKey::Default);
    }
}
