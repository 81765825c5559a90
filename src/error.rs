#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("expected 33 pose landmarks, got {0}")]
    PoseLandmarkCount(usize),

    #[error("expected 21 hand landmarks, got {0}")]
    HandLandmarkCount(usize),

    #[error("failed to construct NotNan from f32: {1}")]
    ConstructNotNan(#[source] ordered_float::FloatIsNan, f32),

    #[error("failed to convert usize value to pose keypoint kind: {0}")]
    ConvertUsizeToPoseKeypointKind(usize),

    #[error("failed to convert usize value to hand keypoint kind: {0}")]
    ConvertUsizeToHandKeypointKind(usize),

    #[error("unknown exercise identifier: {0}")]
    UnknownExercise(String),
}
