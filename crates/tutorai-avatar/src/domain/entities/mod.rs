//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Persona: Voice and rig profile applied to the avatar
//! - ChatInput: Accepted shapes of an incoming conversational payload
//! - ResponseEnvelope: Structured reply the model is instructed to emit

mod envelope;
mod input;
mod persona;

pub use envelope::*;
pub use input::*;
pub use persona::*;
