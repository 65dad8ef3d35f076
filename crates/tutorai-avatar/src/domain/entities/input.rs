//! ChatInput - Incoming conversational payloads
//!
//! The host chat application hands the pipeline one of several shapes.
//! They are classified once here; nothing downstream inspects raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::value_objects::PersonaKey;

/// A single chat message as sent by the host application
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InputMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl InputMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            content: Some(Value::String(content.into())),
            metadata: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Some("assistant".to_string()),
            content: Some(Value::String(content.into())),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn is_user(&self) -> bool {
        self.role.as_deref() == Some("user")
    }

    /// `metadata.avatar_type`, if this message carries one
    pub fn avatar_type(&self) -> Option<&str> {
        self.metadata.as_ref()?.get("avatar_type")?.as_str()
    }

    /// Parse a message list leniently; entries that are not message objects are skipped
    pub fn list_from(value: &Value) -> Vec<InputMessage> {
        value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter(|item| item.is_object())
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Accepted input shapes, in priority order
#[derive(Debug, Clone, PartialEq)]
pub enum ChatInput<'a> {
    /// Bare string
    Text(&'a str),
    /// `{"messages": [...], ...}`
    Conversation(Vec<InputMessage>),
    /// `{"content": ..., ...}`
    Content(&'a Value),
    /// `[{"role": ..., "content": ...}, ...]`
    Messages(Vec<InputMessage>),
    /// Anything else
    Other,
}

impl<'a> ChatInput<'a> {
    /// Classify a raw payload. First matching shape wins.
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::String(text) => ChatInput::Text(text),
            Value::Object(map) => {
                if let Some(messages) = map.get("messages") {
                    ChatInput::Conversation(InputMessage::list_from(messages))
                } else if let Some(content) = map.get("content") {
                    ChatInput::Content(content)
                } else {
                    ChatInput::Other
                }
            }
            Value::Array(_) => ChatInput::Messages(InputMessage::list_from(value)),
            _ => ChatInput::Other,
        }
    }

    /// Messages carried by this shape, oldest first
    pub fn messages(&self) -> &[InputMessage] {
        match self {
            ChatInput::Conversation(messages) | ChatInput::Messages(messages) => messages,
            _ => &[],
        }
    }
}

/// Utterance and persona extracted from one call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedInput {
    pub utterance: String,
    pub persona: PersonaKey,
}
