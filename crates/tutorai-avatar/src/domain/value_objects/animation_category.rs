//! AnimationCategory - GLB animation library sections

use serde::{Deserialize, Serialize};

/// Category tag of a GLB animation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AnimationCategory {
    #[default]
    Expression,
    Idle,
    Locomotion,
    Dance,
}

impl AnimationCategory {
    pub const ALL: [AnimationCategory; 4] = [
        AnimationCategory::Expression,
        AnimationCategory::Idle,
        AnimationCategory::Locomotion,
        AnimationCategory::Dance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationCategory::Expression => "expression",
            AnimationCategory::Idle => "idle",
            AnimationCategory::Locomotion => "locomotion",
            AnimationCategory::Dance => "dance",
        }
    }
}

impl std::fmt::Display for AnimationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AnimationCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "expression" => Ok(AnimationCategory::Expression),
            "idle" => Ok(AnimationCategory::Idle),
            "locomotion" => Ok(AnimationCategory::Locomotion),
            "dance" => Ok(AnimationCategory::Dance),
            _ => Err(format!("Unknown animation category: {}", s)),
        }
    }
}
