//! PersonaKey - Identifier of a registered avatar persona

use serde::{Deserialize, Serialize};

/// Persona identifier
///
/// Resolution from free text is total: anything outside the registry
/// (empty, misspelled, unrelated) lands on [`PersonaKey::Default`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PersonaKey {
    Scholar,
    Mentor,
    Coach,
    Innovator,
    #[default]
    Default,
}

impl PersonaKey {
    /// Every registered key, in registry order
    pub const ALL: [PersonaKey; 5] = [
        PersonaKey::Scholar,
        PersonaKey::Mentor,
        PersonaKey::Coach,
        PersonaKey::Innovator,
        PersonaKey::Default,
    ];

    /// Resolve a raw key, falling back to `Default` for anything unknown
    pub fn resolve(raw: &str) -> Self {
        raw.trim().parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaKey::Scholar => "scholar",
            PersonaKey::Mentor => "mentor",
            PersonaKey::Coach => "coach",
            PersonaKey::Innovator => "innovator",
            PersonaKey::Default => "default",
        }
    }
}

impl std::fmt::Display for PersonaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PersonaKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scholar" => Ok(PersonaKey::Scholar),
            "mentor" => Ok(PersonaKey::Mentor),
            "coach" => Ok(PersonaKey::Coach),
            "innovator" => Ok(PersonaKey::Innovator),
            "default" => Ok(PersonaKey::Default),
            _ => Err(format!("Unknown persona: {}", s)),
        }
    }
}
