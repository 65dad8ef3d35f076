//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod animation_category;
mod gender;
mod gesture_channel;
mod persona_key;

pub use animation_category::*;
pub use gender::*;
pub use gesture_channel::*;
pub use persona_key::*;
