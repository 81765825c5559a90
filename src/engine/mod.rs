use crate::{exercise::Exercise, landmarks::Frame};
use std::fmt;

mod grip;
mod head;
mod knee;
mod pinch;
mod shoulder;

pub(crate) use grip::HandOpenClose;
pub(crate) use head::HeadTurn;
pub(crate) use knee::KneeRaise;
pub(crate) use pinch::FingerPinch;
pub(crate) use shoulder::ShoulderRaise;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum PinchPhase {
    Pinched,
    Released,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum GripPhase {
    Open,
    Fist,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum KneePhase {
    Up,
    Down,
}

/// Progress through a repetition's motion cycle. Each analyzer owns its own
/// variant family; holding the last observed phase across noisy frames is what
/// gives the counters their hysteresis.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Phase {
    Idle,
    Head(Side),
    Pinch(PinchPhase),
    Grip(GripPhase),
    Knee(KneePhase),
    Shoulder { left_held: bool, right_held: bool },
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Idle => f.write_str("idle"),
            Self::Head(Side::Right) => f.write_str("right"),
            Self::Head(Side::Left) => f.write_str("left"),
            Self::Pinch(PinchPhase::Pinched) => f.write_str("pinched"),
            Self::Pinch(PinchPhase::Released) => f.write_str("released"),
            Self::Grip(GripPhase::Open) => f.write_str("open"),
            Self::Grip(GripPhase::Fist) => f.write_str("fist"),
            Self::Knee(KneePhase::Up) => f.write_str("up"),
            Self::Knee(KneePhase::Down) => f.write_str("down"),
            Self::Shoulder {
                left_held,
                right_held,
            } => write!(f, "L{}R{}", u8::from(left_held), u8::from(right_held)),
        }
    }
}

/// The per-session counter state threaded across frames. Owned by the caller;
/// reset to `{0, Idle}` whenever a session restarts.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub(crate) struct RepState {
    pub(crate) reps: u32,
    pub(crate) phase: Phase,
}

impl RepState {
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

/// The engine's verdict for one frame. `reps` never decreases relative to the
/// prior state and `quality` is clamped to `[0, 100]`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Evaluation {
    pub(crate) reps: u32,
    pub(crate) phase: Phase,
    pub(crate) quality: f32,
    pub(crate) status: String,
}

impl Evaluation {
    /// Neutral result that leaves the prior state untouched. Used for the
    /// subject-not-visible and degenerate-geometry fallbacks.
    pub(crate) fn hold(prior: &RepState, status: &str) -> Self {
        Self {
            reps: prior.reps,
            phase: prior.phase,
            quality: 0.0,
            status: status.to_owned(),
        }
    }
}

/// One repetition-detection state machine over a specific subset of keypoints.
pub(crate) trait Analyzer {
    fn evaluate(&self, frame: Frame<'_>, prior: &RepState) -> Evaluation;
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum ExerciseAnalyzer {
    HeadTurn(HeadTurn),
    FingerPinch(FingerPinch),
    HandOpenClose(HandOpenClose),
    KneeRaise(KneeRaise),
    ShoulderRaise(ShoulderRaise),
}

impl From<Exercise> for ExerciseAnalyzer {
    fn from(exercise: Exercise) -> Self {
        match exercise {
            Exercise::HeadTurn => Self::HeadTurn(HeadTurn::default()),
            Exercise::FingerPinch => Self::FingerPinch(FingerPinch::default()),
            Exercise::HandOpenClose => Self::HandOpenClose(HandOpenClose::default()),
            Exercise::KneeRaise => Self::KneeRaise(KneeRaise::default()),
            Exercise::ShoulderRaise => Self::ShoulderRaise(ShoulderRaise::default()),
        }
    }
}

impl Analyzer for ExerciseAnalyzer {
    fn evaluate(&self, frame: Frame<'_>, prior: &RepState) -> Evaluation {
        match self {
            Self::HeadTurn(a) => a.evaluate(frame, prior),
            Self::FingerPinch(a) => a.evaluate(frame, prior),
            Self::HandOpenClose(a) => a.evaluate(frame, prior),
            Self::KneeRaise(a) => a.evaluate(frame, prior),
            Self::ShoulderRaise(a) => a.evaluate(frame, prior),
        }
    }
}

/// Evaluate one frame for a known exercise.
pub(crate) fn evaluate_exercise(
    exercise: Exercise,
    frame: Frame<'_>,
    prior: &RepState,
) -> Evaluation {
    let mut evaluation = ExerciseAnalyzer::from(exercise).evaluate(frame, prior);
    evaluation.quality = evaluation.quality.clamp(0.0, 100.0);
    evaluation
}

/// Evaluate one frame for an exercise identifier. Total over all string
/// inputs: an unrecognized identifier yields the neutral "Idle" fallback
/// instead of failing.
pub(crate) fn evaluate(exercise_id: &str, frame: Frame<'_>, prior: &RepState) -> Evaluation {
    match Exercise::from_id(exercise_id) {
        Some(exercise) => evaluate_exercise(exercise, frame, prior),
        None => Evaluation::hold(prior, "Idle"),
    }
}
