//! Domain Services
//!
//! Stateless operations over the static persona and animation tables.

pub mod animation_catalog;
pub mod input_normalizer;
pub mod prompt_composer;

pub use animation_catalog::animation_instructions;
pub use input_normalizer::{extract_persona_key, extract_utterance, normalize};
pub use prompt_composer::compose_prompt;
