//! Animation Catalog
//!
//! GLB animation library available to the avatar renderer. Canonical names
//! are built by prepending the rig's gender prefix to a fixed suffix set
//! that is shared by both rigs; friendly aliases are rig independent.

use std::fmt::Write;

use crate::domain::entities::Persona;
use crate::domain::value_objects::{AnimationCategory, Gender, GestureChannel};

/// Placeholder replaced by the gender prefix in worked examples
const PREFIX_TOKEN: &str = "{prefix}";

/// Names wrapped per line in the rendered catalog
const NAMES_PER_LINE: usize = 5;

/// A labelled run of canonical suffixes within a category
#[derive(Debug, Clone, Copy)]
pub struct NameGroup {
    pub label: &'static str,
    pub suffixes: &'static [&'static str],
}

const EXPRESSION_GROUPS: &[NameGroup] = &[
    NameGroup {
        label: "talking variations",
        suffixes: &[
            "Talking_Variations_001",
            "Talking_Variations_002",
            "Talking_Variations_003",
            "Talking_Variations_004",
            "Talking_Variations_005",
            "Talking_Variations_006",
            "Talking_Variations_007",
            "Talking_Variations_008",
            "Talking_Variations_009",
            "Talking_Variations_010",
        ],
    },
    NameGroup {
        label: "standing expressions",
        suffixes: &[
            "Standing_Expressions_001",
            "Standing_Expressions_002",
            "Standing_Expressions_004",
            "Standing_Expressions_005",
            "Standing_Expressions_006",
            "Standing_Expressions_007",
            "Standing_Expressions_008",
            "Standing_Expressions_009",
            "Standing_Expressions_010",
            "Standing_Expressions_011",
            "Standing_Expressions_012",
            "Standing_Expressions_013",
            "Standing_Expressions_014",
            "Standing_Expressions_015",
            "Standing_Expressions_016",
            "Standing_Expressions_017",
            "Standing_Expressions_018",
        ],
    },
];

const IDLE_GROUPS: &[NameGroup] = &[NameGroup {
    label: "idle animations",
    suffixes: &[
        "Standing_Idle_001",
        "Standing_Idle_002",
        "Standing_Idle_Variations_001",
        "Standing_Idle_Variations_002",
        "Standing_Idle_Variations_003",
        "Standing_Idle_Variations_004",
        "Standing_Idle_Variations_005",
        "Standing_Idle_Variations_006",
        "Standing_Idle_Variations_007",
        "Standing_Idle_Variations_008",
        "Standing_Idle_Variations_009",
        "Standing_Idle_Variations_010",
    ],
}];

const LOCOMOTION_GROUPS: &[NameGroup] = &[
    NameGroup {
        label: "walking animations",
        suffixes: &[
            "Walk_001",
            "Walk_002",
            "Walk_Backwards_001",
            "Walk_Strafe_Left_002",
            "Walk_Strafe_Right_002",
            "Walk_Jump_001",
            "Walk_Jump_002",
            "Walk_Jump_003",
        ],
    },
    NameGroup {
        label: "jogging animations",
        suffixes: &[
            "Jog_001",
            "Jog_003",
            "Jog_Backwards_001",
            "Jog_Strafe_Left_001",
            "Jog_Strafe_Right_001",
            "Jog_Jump_001",
            "Jog_Jump_002",
        ],
    },
    NameGroup {
        label: "running animations",
        suffixes: &[
            "Run_001",
            "Run_Backwards_002",
            "Run_Strafe_Left_002",
            "Run_Strafe_Right_002",
            "Run_Jump_001",
            "Run_Jump_002",
        ],
    },
    NameGroup {
        label: "crouching animations",
        suffixes: &[
            "Crouch_Walk_003",
            "CrouchedWalk_Backwards_002",
            "Crouch_Strafe_Left_002",
            "Crouch_Strafe_Right_002",
        ],
    },
    NameGroup {
        label: "falling animations",
        suffixes: &["Falling_Idle_002"],
    },
];

const DANCE_GROUPS: &[NameGroup] = &[NameGroup {
    label: "dance animations",
    suffixes: &[
        "Dances_001",
        "Dances_002",
        "Dances_003",
        "Dances_004",
        "Dances_005",
        "Dances_006",
        "Dances_007",
        "Dances_008",
        "Dances_009",
        "Dances_011",
    ],
}];

/// Suffix groups of a category
pub fn name_groups(category: AnimationCategory) -> &'static [NameGroup] {
    match category {
        AnimationCategory::Expression => EXPRESSION_GROUPS,
        AnimationCategory::Idle => IDLE_GROUPS,
        AnimationCategory::Locomotion => LOCOMOTION_GROUPS,
        AnimationCategory::Dance => DANCE_GROUPS,
    }
}

/// Friendly, rig-independent names of a category
pub fn aliases(category: AnimationCategory) -> &'static [&'static str] {
    match category {
        AnimationCategory::Expression => &[
            "talking_neutral",
            "talking_happy",
            "talking_excited",
            "talking_thoughtful",
            "talking_concerned",
            "expression_smile",
            "expression_sad",
            "expression_surprise",
            "expression_thinking",
            "expression_angry",
        ],
        AnimationCategory::Idle => &[
            "idle_normal",
            "idle_shift_weight",
            "idle_look_around",
            "idle_stretch",
            "idle_impatient",
        ],
        AnimationCategory::Locomotion => &[
            "walk_forward",
            "walk_backward",
            "jog_forward",
            "run_forward",
            "jump",
            "crouch",
        ],
        AnimationCategory::Dance => &[
            "dance_casual",
            "dance_energetic",
            "dance_rhythmic",
            "dance_silly",
        ],
    }
}

/// Canonical animation names of a category for one rig
pub fn canonical_names(category: AnimationCategory, gender: Gender) -> Vec<String> {
    name_groups(category)
        .iter()
        .flat_map(|group| group.suffixes.iter())
        .map(|suffix| format!("{}{}", gender.prefix(), suffix))
        .collect()
}

/// Category a name belongs to, whether canonical (either rig) or alias
pub fn category_of(name: &str) -> Option<AnimationCategory> {
    let suffix = [Gender::Male, Gender::Female]
        .iter()
        .find_map(|g| name.strip_prefix(g.prefix()));

    AnimationCategory::ALL.into_iter().find(|&category| match suffix {
        Some(suffix) => name_groups(category)
            .iter()
            .any(|group| group.suffixes.contains(&suffix)),
        None => aliases(category).contains(&name),
    })
}

fn section_letter(category: AnimationCategory) -> char {
    match category {
        AnimationCategory::Expression => 'A',
        AnimationCategory::Idle => 'B',
        AnimationCategory::Locomotion => 'C',
        AnimationCategory::Dance => 'D',
    }
}

fn write_name_lines(out: &mut String, names: &[String]) {
    for (i, chunk) in names.chunks(NAMES_PER_LINE).enumerate() {
        let line = chunk
            .iter()
            .map(|name| format!("\"{}\"", name))
            .collect::<Vec<_>>()
            .join(", ");
        let separator = if (i + 1) * NAMES_PER_LINE < names.len() { "," } else { "" };
        let _ = writeln!(out, "        {}{}", line, separator);
    }
}

fn write_gesture_codes(out: &mut String) {
    out.push_str("1. SIMPLE ANIMATION CODES (use in \"animation\" object):\n");
    for channel in GestureChannel::ALL {
        let codes = channel
            .codes()
            .iter()
            .enumerate()
            .map(|(code, label)| format!("{}={}", code, label))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "   - {}: \n     {}", channel.field(), codes);
    }
}

fn write_glb_library(out: &mut String, gender: Gender) {
    out.push_str("2. GLB ANIMATIONS (use in \"glbAnimation\" field with appropriate category):\n");
    for category in AnimationCategory::ALL {
        let _ = writeln!(
            out,
            "\n   {}. {} ANIMATIONS (\"glbAnimationCategory\": \"{}\")",
            section_letter(category),
            category.as_str().to_uppercase(),
            category
        );
        for group in name_groups(category) {
            let names: Vec<String> = group
                .suffixes
                .iter()
                .map(|suffix| format!("{}{}", gender.prefix(), suffix))
                .collect();
            let _ = writeln!(out, "      - {} {}:", gender.label(), group.label);
            write_name_lines(out, &names);
        }
        let alias_names: Vec<String> = aliases(category).iter().map(|a| a.to_string()).collect();
        out.push_str("      - Also available with friendly names:\n");
        write_name_lines(out, &alias_names);
    }
}

const WORKED_EXAMPLES: &[(&str, &str)] = &[
    (
        "For a happy greeting",
        r#"{
  "response": "Hello! I'm excited to help you with any questions you might have today.",
  "animation": {
    "facial_expression": 1,
    "head_movement": 1,
    "hand_gesture": 3,
    "eye_movement": 5
  },
  "glbAnimation": "talking_happy",
  "glbAnimationCategory": "expression"
}"#,
    ),
    (
        "For a thoughtful answer",
        r#"{
  "response": "That's a complex question that requires careful consideration of multiple factors and perspectives.",
  "animation": {
    "facial_expression": 3,
    "head_movement": 3,
    "hand_gesture": 2,
    "eye_movement": 1,
    "body_posture": 2
  },
  "glbAnimation": [
    {
      "name": "{prefix}Standing_Expressions_013",
      "category": "expression",
      "duration": 3.5
    },
    {
      "name": "talking_thoughtful",
      "category": "expression"
    }
  ]
}"#,
    ),
    (
        "For an excited response with multiple animations",
        r#"{
  "response": "That's amazing news! I'm so excited to hear about your achievement and can't wait to learn more details!",
  "animation": {
    "facial_expression": 1,
    "head_movement": 1,
    "hand_gesture": 5,
    "eye_movement": 6
  },
  "glbAnimation": [
    {
      "name": "{prefix}Talking_Variations_005",
      "category": "expression",
      "duration": 3.0
    },
    {
      "name": "talking_excited",
      "category": "expression",
      "duration": 2.5
    },
    {
      "name": "{prefix}Standing_Idle_Variations_001",
      "category": "idle"
    }
  ]
}"#,
    ),
    (
        "For a demonstration with locomotion",
        r#"{
  "response": "Let me show you how to walk through this process step by step so you understand each important detail.",
  "animation": {
    "facial_expression": 0,
    "hand_gesture": 2
  },
  "glbAnimation": [
    {
      "name": "{prefix}Walk_001",
      "category": "locomotion",
      "duration": 2.0
    },
    {
      "name": "talking_neutral",
      "category": "expression"
    }
  ]
}"#,
    ),
];

/// Worked envelope examples with the rig prefix filled in
pub fn worked_examples(gender: Gender) -> Vec<(&'static str, String)> {
    WORKED_EXAMPLES
        .iter()
        .map(|(caption, template)| (*caption, template.replace(PREFIX_TOKEN, gender.prefix())))
        .collect()
}

/// Instruction block describing the reply format and animation library
/// for a persona's rig. Ends with the lead-in to the user's question.
pub fn animation_instructions(persona: &Persona) -> String {
    let gender = persona.gender;
    let mut out = String::with_capacity(8 * 1024);

    out.push_str(
        "\nIMPORTANT: Format ALL responses as valid JSON with these fields:\n\
         - \"response\": Your text answer to the user's question (REQUIRED, minimum 5 words)\n\
         - \"animation\": Animation codes for basic expressions (OPTIONAL)\n\
         - \"glbAnimation\": Name or array of animation names from the library (OPTIONAL)\n\
         - \"glbAnimationCategory\": Category for the animation (OPTIONAL, defaults to \"expression\")\n\n\
         Your animations should precisely match the content and emotion of your response. \
         Always include multiple animations when possible to make your avatar more expressive and engaging.\n\n\
         Available animation options are:\n\n",
    );

    write_gesture_codes(&mut out);
    out.push('\n');
    write_glb_library(&mut out, gender);

    out.push_str(
        "\nMatch animations to the emotional context and content of your response. \
         For example, use \"talking_excited\" for enthusiastic responses, \
         \"expression_thinking\" for contemplative answers, \
         or \"dance_energetic\" for celebratory moments.\n\n\
         Example JSON responses:\n",
    );

    for (caption, example) in worked_examples(gender) {
        let _ = write!(out, "\n{}:\n{}\n", caption, example);
    }

    out.push_str("\nThe user's question is: ");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ResponseEnvelope;
    use crate::domain::value_objects::PersonaKey;

    #[test]
    fn test_template_shape_is_shared_by_both_rigs() {
        for category in AnimationCategory::ALL {
            let male = canonical_names(category, Gender::Male);
            let female = canonical_names(category, Gender::Female);
            assert_eq!(male.len(), female.len());
            for (m, f) in male.iter().zip(&female) {
                assert_eq!(m.strip_prefix("M_"), f.strip_prefix("F_"));
            }
        }
    }

    #[test]
    fn test_locomotion_names() {
        let names = canonical_names(AnimationCategory::Locomotion, Gender::Female);
        assert_eq!(names.first().map(String::as_str), Some("F_Walk_001"));
        assert!(names.contains(&"F_Walk_Backwards_001".to_string()));
        assert!(names.contains(&"F_Run_001".to_string()));
        assert_eq!(names.len(), 26);
    }

    #[test]
    fn test_category_of() {
        assert_eq!(category_of("M_Dances_011"), Some(AnimationCategory::Dance));
        assert_eq!(category_of("F_Standing_Idle_002"), Some(AnimationCategory::Idle));
        assert_eq!(category_of("idle_stretch"), Some(AnimationCategory::Idle));
        assert_eq!(category_of("jump"), Some(AnimationCategory::Locomotion));
        assert_eq!(category_of("M_Dances_010"), None);
        assert_eq!(category_of("moonwalk"), None);
    }

    #[test]
    fn test_instructions_use_only_the_persona_prefix() {
        for persona in Persona::all() {
            let text = animation_instructions(persona);
            let own = format!("\"{}", persona.prefix());
            let other = match persona.gender {
                Gender::Male => "\"F_",
                Gender::Female => "\"M_",
            };
            assert!(text.contains(&own), "{} has no {} names", persona.key, own);
            assert!(!text.contains(other), "{} leaks {} names", persona.key, other);
            assert!(!text.contains(PREFIX_TOKEN));
        }
    }

    #[test]
    fn test_instructions_list_every_name_and_alias() {
        let coach = Persona::get(PersonaKey::Coach);
        let text = animation_instructions(coach);
        for category in AnimationCategory::ALL {
            for name in canonical_names(category, Gender::Female) {
                assert!(text.contains(&format!("\"{}\"", name)), "missing {}", name);
            }
            for alias in aliases(category) {
                assert!(text.contains(&format!("\"{}\"", alias)), "missing {}", alias);
            }
        }
        assert!(text.contains("Female talking variations"));
        assert!(text.contains("8=finger_snap"));
        assert!(text.ends_with("The user's question is: "));
    }

    #[test]
    fn test_worked_examples_are_readable_envelopes() {
        for gender in [Gender::Male, Gender::Female] {
            let examples = worked_examples(gender);
            assert_eq!(examples.len(), 4);
            for (caption, example) in examples {
                let envelope = ResponseEnvelope::from_model_text(&example)
                    .unwrap_or_else(|| panic!("{caption} does not parse"));
                for name in envelope.animation_names() {
                    assert!(category_of(name).is_some(), "{caption}: unknown {name}");
                }
            }
        }
    }
}
