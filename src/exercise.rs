use crate::error::Error;
use std::{fmt, str::FromStr};

/// The closed set of exercises the engine knows how to evaluate.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Exercise {
    HeadTurn,
    FingerPinch,
    HandOpenClose,
    KneeRaise,
    ShoulderRaise,
}

impl Exercise {
    /// Resolve a catalog identifier. Returns `None` for anything outside the
    /// five known identifiers; the dispatch fallback handles that case.
    pub(crate) fn from_id(id: &str) -> Option<Self> {
        match id {
            "head" => Some(Self::HeadTurn),
            "finger" => Some(Self::FingerPinch),
            "hand" => Some(Self::HandOpenClose),
            "leg" => Some(Self::KneeRaise),
            "shoulder" => Some(Self::ShoulderRaise),
            _ => None,
        }
    }

    pub(crate) fn id(self) -> &'static str {
        match self {
            Self::HeadTurn => "head",
            Self::FingerPinch => "finger",
            Self::HandOpenClose => "hand",
            Self::KneeRaise => "leg",
            Self::ShoulderRaise => "shoulder",
        }
    }

    pub(crate) fn info(self) -> &'static ExerciseInfo {
        match self {
            Self::HeadTurn => &CATALOG[0],
            Self::FingerPinch => &CATALOG[1],
            Self::HandOpenClose => &CATALOG[2],
            Self::KneeRaise => &CATALOG[3],
            Self::ShoulderRaise => &CATALOG[4],
        }
    }
}

impl FromStr for Exercise {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| Error::UnknownExercise(s.to_owned()))
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// Static catalog entry: display metadata and the target repetition count the
/// caller uses to compute progress. The engine itself only sees the bare
/// identifier.
#[derive(Debug)]
pub(crate) struct ExerciseInfo {
    pub(crate) exercise: Exercise,
    pub(crate) name: &'static str,
    pub(crate) target_reps: u32,
    pub(crate) difficulty: Difficulty,
    pub(crate) instructions: &'static [&'static str],
}

pub(crate) const CATALOG: [ExerciseInfo; 5] = [
    ExerciseInfo {
        exercise: Exercise::HeadTurn,
        name: "Head turns",
        target_reps: 10,
        difficulty: Difficulty::Beginner,
        instructions: &[
            "Sit upright facing the camera",
            "Keep your shoulders level",
            "Turn your head fully to one side, then the other",
        ],
    },
    ExerciseInfo {
        exercise: Exercise::FingerPinch,
        name: "Finger pinches",
        target_reps: 15,
        difficulty: Difficulty::Beginner,
        instructions: &[
            "Hold your hand up with the palm facing the camera",
            "Touch your thumb and index fingertips together",
            "Spread them fully apart to finish each repetition",
        ],
    },
    ExerciseInfo {
        exercise: Exercise::HandOpenClose,
        name: "Hand open and close",
        target_reps: 15,
        difficulty: Difficulty::Intermediate,
        instructions: &[
            "Hold your hand up with fingers pointing at the ceiling",
            "Open the hand wide, then squeeze into a fist",
        ],
    },
    ExerciseInfo {
        exercise: Exercise::KneeRaise,
        name: "Knee raises",
        target_reps: 12,
        difficulty: Difficulty::Intermediate,
        instructions: &[
            "Stand back so your whole body is in the frame",
            "Lift one knee above hip height",
            "Lower it under control to finish each repetition",
        ],
    },
    ExerciseInfo {
        exercise: Exercise::ShoulderRaise,
        name: "Shoulder raises",
        target_reps: 12,
        difficulty: Difficulty::Advanced,
        instructions: &[
            "Sit or stand with your upper body in the frame",
            "Shrug each shoulder up toward your ear",
            "Relax it fully back down; sides count independently",
        ],
    },
];
