//! GestureChannel - Integer-coded animation channels of the response envelope

use serde::{Deserialize, Serialize};

/// One of the five simple animation channels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GestureChannel {
    FacialExpression,
    HeadMovement,
    HandGesture,
    EyeMovement,
    BodyPosture,
}

impl GestureChannel {
    pub const ALL: [GestureChannel; 5] = [
        GestureChannel::FacialExpression,
        GestureChannel::HeadMovement,
        GestureChannel::HandGesture,
        GestureChannel::EyeMovement,
        GestureChannel::BodyPosture,
    ];

    /// Envelope field name
    pub fn field(&self) -> &'static str {
        match self {
            GestureChannel::FacialExpression => "facial_expression",
            GestureChannel::HeadMovement => "head_movement",
            GestureChannel::HandGesture => "hand_gesture",
            GestureChannel::EyeMovement => "eye_movement",
            GestureChannel::BodyPosture => "body_posture",
        }
    }

    /// Labels indexed by code
    pub fn codes(&self) -> &'static [&'static str] {
        match self {
            GestureChannel::FacialExpression => &[
                "neutral",
                "smile",
                "frown",
                "raised_eyebrows",
                "surprise",
                "wink",
                "sad",
                "angry",
            ],
            GestureChannel::HeadMovement => &[
                "no_move",
                "nod_small",
                "shake",
                "tilt",
                "look_down",
                "look_up",
                "turn_left",
                "turn_right",
            ],
            GestureChannel::HandGesture => &[
                "no_move",
                "open_hand",
                "pointing",
                "wave",
                "open_palm",
                "thumbs_up",
                "fist",
                "peace_sign",
                "finger_snap",
            ],
            GestureChannel::EyeMovement => &[
                "no_move",
                "look_up",
                "look_down",
                "look_left",
                "look_right",
                "blink",
                "wide_open",
                "squint",
            ],
            GestureChannel::BodyPosture => &[
                "neutral",
                "forward_lean",
                "lean_back",
                "shoulders_up",
                "rest_arms",
                "hands_on_hips",
                "sit",
                "stand",
            ],
        }
    }

    /// Label for a code, if the code is in range
    pub fn label(&self, code: u8) -> Option<&'static str> {
        self.codes().get(code as usize).copied()
    }
}

impl std::fmt::Display for GestureChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field())
    }
}
