//! Prompt Composer
//!
//! Persona framing and the animation block must precede the user's text so
//! the model reads them as instructions rather than conversation.

use crate::domain::entities::Persona;
use crate::domain::services::animation_catalog::animation_instructions;
use crate::domain::value_objects::PersonaKey;

/// Build the full prompt for an utterance spoken to a persona
pub fn compose_prompt(utterance: &str, persona: PersonaKey) -> String {
    let persona = Persona::get(persona);
    let instructions = animation_instructions(persona);

    let mut prompt =
        String::with_capacity(persona.instruction.len() + instructions.len() + utterance.len());
    prompt.push_str(persona.instruction);
    prompt.push_str(&instructions);
    prompt.push_str(utterance);
    prompt
}
