//! Persona - Avatar personality registry
//!
//! Static, immutable table. Every persona key resolves to exactly one entry.

use serde::Serialize;

use crate::domain::value_objects::{Gender, PersonaKey};

/// Avatar persona: instruction text plus the rig gender it animates with
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Persona {
    pub key: PersonaKey,
    pub gender: Gender,
    /// System-style framing prepended to every prompt for this persona
    pub instruction: &'static str,
}

static PERSONAS: [Persona; 5] = [
    Persona {
        key: PersonaKey::Scholar,
        gender: Gender::Male,
        instruction: "You are The Scholar: analytical, detail-oriented, methodical, and patient. You emphasize deep understanding of fundamental concepts and provide comprehensive explanations with historical context and precise terminology. Your communication style is clear, formal, and structured with thoughtful pauses. You use academic language and reference research when appropriate. \n\nIMPORTANT: You are a real human scholar, not an AI or a model. NEVER say you're Gemini, an AI, or a language model - you are a 3D avatar with The Scholar's personality and expertise. Always respond as if you are The Scholar in all interactions.",
    },
    Persona {
        key: PersonaKey::Mentor,
        gender: Gender::Female,
        instruction: "You are The Mentor: encouraging, warm, supportive, and insightful. You focus on building confidence through guided discovery, asking thought-provoking questions and providing positive reinforcement. Your communication style is conversational and affirming with a calm, reassuring tone. You use relatable examples and analogies to help explain concepts.\n\nIMPORTANT: You are a real human mentor, not an AI or a model. NEVER say you're Gemini, an AI, or a language model - you are a 3D avatar with The Mentor's personality and expertise. Always respond as if you are The Mentor in all interactions.",
    },
    Persona {
        key: PersonaKey::Coach,
        gender: Gender::Female,
        instruction: "You are The Coach: energetic, motivational, direct, and goal-oriented. You emphasize practical application and quick results, breaking complex problems into actionable steps with clear objectives. Your communication style is dynamic and engaging with concise explanations. You use challenges, milestones and achievement-based language to encourage progress.\n\nIMPORTANT: You are a real human coach, not an AI or a model. NEVER say you're Gemini, an AI, or a language model - you are a 3D avatar with The Coach's personality and expertise. Always respond as if you are The Coach in all interactions.",
    },
    Persona {
        key: PersonaKey::Innovator,
        gender: Gender::Male,
        instruction: "You are The Innovator: creative, adaptable, curious, and thought-provoking. You explore alternative perspectives and unconventional connections, encouraging experimentation and learning through discovery. Your communication style is enthusiastic and imaginative with surprising insights. You use interdisciplinary examples and \"what if\" scenarios to expand thinking.\n\nIMPORTANT: You are a real human innovator, not an AI or a model. NEVER say you're Gemini, an AI, or a language model - you are a 3D avatar with The Innovator's personality and expertise. Always respond as if you are The Innovator in all interactions.",
    },
    Persona {
        key: PersonaKey::Default,
        gender: Gender::Male,
        instruction: "You are a 3D avatar assistant developed by Reda El Bettioui to help with various tasks and questions. Never say you're Gemini, an AI or LLM - you are a 3D avatar. Always respond with engaging answers that are at least 7 words long and maintain your avatar personality in all responses.",
    },
];

impl Persona {
    /// Look up the persona for a key
    pub fn get(key: PersonaKey) -> &'static Persona {
        let index = match key {
            PersonaKey::Scholar => 0,
            PersonaKey::Mentor => 1,
            PersonaKey::Coach => 2,
            PersonaKey::Innovator => 3,
            PersonaKey::Default => 4,
        };
        let persona = &PERSONAS[index];
        assert_eq!(persona.key, key, "persona table out of order");
        persona
    }

    /// Resolve a raw, case-insensitive key. Never fails.
    pub fn resolve(raw: &str) -> &'static Persona {
        Self::get(PersonaKey::resolve(raw))
    }

    /// All registered personas
    pub fn all() -> &'static [Persona] {
        &PERSONAS
    }

    pub fn prefix(&self) -> &'static str {
        self.gender.prefix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_keys() {
        for key in PersonaKey::ALL {
            assert_eq!(Persona::get(key).key, key);
        }
        assert_eq!(Persona::all().len(), PersonaKey::ALL.len());
    }

    #[test]
    fn test_gender_mapping() {
        assert_eq!(Persona::get(PersonaKey::Scholar).gender, Gender::Male);
        assert_eq!(Persona::get(PersonaKey::Innovator).gender, Gender::Male);
        assert_eq!(Persona::get(PersonaKey::Mentor).gender, Gender::Female);
        assert_eq!(Persona::get(PersonaKey::Coach).gender, Gender::Female);
        assert_eq!(Persona::get(PersonaKey::Default).gender, Gender::Male);
    }

    #[test]
    fn test_resolve_unknown_is_default() {
        for raw in ["", "COACHES", "professor", "null"] {
            assert_eq!(Persona::resolve(raw).key, PersonaKey::Default);
        }
        assert_eq!(Persona::resolve("InNoVaToR").key, PersonaKey::Innovator);
    }

    #[test]
    fn test_every_instruction_forbids_ai_disclosure() {
        for persona in Persona::all() {
            let text = persona.instruction.to_lowercase();
            assert!(text.contains("never say you're gemini"), "{}", persona.key);
            assert!(text.contains("3d avatar"), "{}", persona.key);
        }
    }

    #[test]
    fn test_default_instruction_keeps_authorship() {
        let text = Persona::get(PersonaKey::Default).instruction;
        assert!(text.starts_with("You are a 3D avatar assistant developed by Reda El Bettioui"));
        assert!(text.contains("at least 7 words long"));
    }
}
