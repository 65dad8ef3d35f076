//! ResponseEnvelope - Structured avatar reply
//!
//! The model is asked to answer with this JSON shape. The pipeline itself
//! returns raw model text; this type exists for downstream consumers that
//! want a best-effort read of that text. No field is validated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AnimationCategory, GestureChannel};

/// Reply envelope consumed by the avatar renderer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// Spoken text
    pub response: String,
    /// Channel name to code; unknown channels are kept as sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<BTreeMap<String, i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glb_animation: Option<GlbAnimation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glb_animation_category: Option<String>,
}

/// `glbAnimation`: a single name or an ordered sequence of steps
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum GlbAnimation {
    Name(String),
    Sequence(Vec<GlbAnimationStep>),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GlbAnimationStep {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f32>,
}

impl ResponseEnvelope {
    /// Best-effort read of model output.
    ///
    /// Accepts bare JSON or JSON wrapped in a Markdown code fence. Returns
    /// `None` when no envelope can be read; the caller keeps the raw text.
    pub fn from_model_text(text: &str) -> Option<Self> {
        let trimmed = strip_code_fence(text.trim());
        if let Ok(envelope) = serde_json::from_str(trimmed) {
            return Some(envelope);
        }

        // Models sometimes wrap the object in prose
        let start = trimmed.find('{')?;
        let end = trimmed.rfind('}')?;
        if end <= start {
            return None;
        }
        serde_json::from_str(&trimmed[start..=end]).ok()
    }

    /// Category of the top-level animation, when it names a known one
    pub fn category(&self) -> Option<AnimationCategory> {
        self.glb_animation_category.as_deref()?.parse().ok()
    }

    /// Code sent for a gesture channel
    pub fn gesture(&self, channel: GestureChannel) -> Option<i64> {
        self.animation.as_ref()?.get(channel.field()).copied()
    }

    /// Animation names in play order
    pub fn animation_names(&self) -> Vec<&str> {
        match &self.glb_animation {
            Some(GlbAnimation::Name(name)) => vec![name.as_str()],
            Some(GlbAnimation::Sequence(steps)) => steps.iter().map(|s| s.name.as_str()).collect(),
            None => Vec::new(),
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop an optional language tag on the opening fence
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
