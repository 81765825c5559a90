//! Deterministic stand-in for the external landmark detector: a scripted
//! subject performing each exercise on a fixed cycle, with periodic
//! subject-lost gaps so the fallback paths get exercised too.

use crate::{
    error::Error,
    exercise::Exercise,
    geom::Point,
    landmarks::{
        Frame, HandKeypointKind, HandLandmarks, PoseKeypointKind, PoseLandmarks,
        NUM_HAND_KEYPOINTS, NUM_POSE_KEYPOINTS,
    },
};
use num_traits::FromPrimitive;
use std::f32::consts::PI;

const FRAMES_PER_CYCLE: f32 = 90.0;
// Every 97th frame the subject drops out of view for one frame.
const SUBJECT_LOST_EVERY: u64 = 97;

/// Owned detections for one scripted frame.
#[derive(Debug, Clone)]
pub(crate) struct ScriptedFrame {
    pose: Option<PoseLandmarks>,
    hand: Option<HandLandmarks>,
}

impl ScriptedFrame {
    pub(crate) fn as_frame(&self) -> Frame<'_> {
        Frame {
            pose: self.pose.as_ref(),
            hand: self.hand.as_ref(),
        }
    }
}

/// Generates the landmark stream for one exercise. Stateless: the frame index
/// alone determines the output, so replays are reproducible.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScriptedSubject {
    exercise: Exercise,
}

impl ScriptedSubject {
    pub(crate) fn new(exercise: Exercise) -> Self {
        Self { exercise }
    }

    pub(crate) fn frame(&self, index: u64) -> Result<ScriptedFrame, Error> {
        if index % SUBJECT_LOST_EVERY == SUBJECT_LOST_EVERY - 1 {
            return Ok(ScriptedFrame {
                pose: None,
                hand: None,
            });
        }

        let t = index as f32 * (2.0 * PI / FRAMES_PER_CYCLE);
        match self.exercise {
            Exercise::HeadTurn => pose_frame(|kind, (x, y)| match kind {
                PoseKeypointKind::Nose => (0.5 + 0.25 * t.sin(), y),
                _ => (x, y),
            }),
            Exercise::KneeRaise => {
                let lift = t.sin().max(0.0);
                pose_frame(move |kind, (x, y)| match kind {
                    PoseKeypointKind::LeftKnee => (x + 0.10 * lift, y - 0.35 * lift),
                    PoseKeypointKind::LeftAnkle => (x, y - 0.25 * lift),
                    _ => (x, y),
                })
            }
            Exercise::ShoulderRaise => {
                let left_lift = t.sin().max(0.0);
                let right_lift = (t - 1.0).sin().max(0.0);
                pose_frame(move |kind, (x, y)| match kind {
                    PoseKeypointKind::LeftShoulder => (x, y - 0.19 * left_lift),
                    PoseKeypointKind::RightShoulder => (x, y - 0.19 * right_lift),
                    _ => (x, y),
                })
            }
            Exercise::FingerPinch => {
                let (thumb_x, thumb_y) = neutral_hand_position(HandKeypointKind::ThumbTip);
                let (wrist_x, wrist_y) = neutral_hand_position(HandKeypointKind::Wrist);
                let scale =
                    ((thumb_x - wrist_x).powi(2) + (thumb_y - wrist_y).powi(2)).sqrt();
                let gap = scale * (0.35 + 0.30 * t.sin());
                hand_frame(move |kind, (x, y)| match kind {
                    HandKeypointKind::IndexTip => (thumb_x + gap, thumb_y),
                    _ => (x, y),
                })
            }
            Exercise::HandOpenClose => {
                let curl = 0.15 * t.sin();
                hand_frame(move |kind, (x, y)| match kind {
                    HandKeypointKind::IndexTip => (x, mcp_y(HandKeypointKind::IndexMcp) - curl),
                    HandKeypointKind::MiddleTip => (x, mcp_y(HandKeypointKind::MiddleMcp) - curl),
                    HandKeypointKind::RingTip => (x, mcp_y(HandKeypointKind::RingMcp) - curl),
                    HandKeypointKind::PinkyTip => (x, mcp_y(HandKeypointKind::PinkyMcp) - curl),
                    _ => (x, y),
                })
            }
        }
    }
}

fn pose_frame<F>(adjust: F) -> Result<ScriptedFrame, Error>
where
    F: Fn(PoseKeypointKind, (f32, f32)) -> (f32, f32),
{
    let points = (0..NUM_POSE_KEYPOINTS)
        .map(|index| {
            let kind = PoseKeypointKind::from_usize(index)
                .ok_or(Error::ConvertUsizeToPoseKeypointKind(index))?;
            let (x, y) = adjust(kind, neutral_pose_position(kind));
            Point::new(x, y)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ScriptedFrame {
        pose: Some(PoseLandmarks::new(&points)?),
        hand: None,
    })
}

fn hand_frame<F>(adjust: F) -> Result<ScriptedFrame, Error>
where
    F: Fn(HandKeypointKind, (f32, f32)) -> (f32, f32),
{
    let points = (0..NUM_HAND_KEYPOINTS)
        .map(|index| {
            let kind = HandKeypointKind::from_usize(index)
                .ok_or(Error::ConvertUsizeToHandKeypointKind(index))?;
            let (x, y) = adjust(kind, neutral_hand_position(kind));
            Point::new(x, y)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ScriptedFrame {
        pose: None,
        hand: Some(HandLandmarks::new(&points)?),
    })
}

fn mcp_y(kind: HandKeypointKind) -> f32 {
    neutral_hand_position(kind).1
}

/// Subject standing upright, facing the camera, arms at the sides.
fn neutral_pose_position(kind: PoseKeypointKind) -> (f32, f32) {
    use PoseKeypointKind::*;
    match kind {
        Nose => (0.50, 0.20),
        LeftEyeInner => (0.53, 0.18),
        LeftEye => (0.55, 0.18),
        LeftEyeOuter => (0.57, 0.18),
        RightEyeInner => (0.47, 0.18),
        RightEye => (0.45, 0.18),
        RightEyeOuter => (0.43, 0.18),
        LeftEar => (0.60, 0.16),
        RightEar => (0.40, 0.16),
        MouthLeft => (0.53, 0.24),
        MouthRight => (0.47, 0.24),
        LeftShoulder => (0.65, 0.40),
        RightShoulder => (0.35, 0.40),
        LeftElbow => (0.70, 0.52),
        RightElbow => (0.30, 0.52),
        LeftWrist => (0.72, 0.64),
        RightWrist => (0.28, 0.64),
        LeftPinky => (0.74, 0.68),
        RightPinky => (0.26, 0.68),
        LeftIndex => (0.73, 0.69),
        RightIndex => (0.27, 0.69),
        LeftThumb => (0.71, 0.67),
        RightThumb => (0.29, 0.67),
        LeftHip => (0.58, 0.62),
        RightHip => (0.42, 0.62),
        LeftKnee => (0.58, 0.78),
        RightKnee => (0.42, 0.78),
        LeftAnkle => (0.58, 0.94),
        RightAnkle => (0.42, 0.94),
        LeftHeel => (0.58, 0.96),
        RightHeel => (0.42, 0.96),
        LeftFootIndex => (0.60, 0.97),
        RightFootIndex => (0.40, 0.97),
    }
}

/// Open hand held up, palm toward the camera, fingers pointing up.
fn neutral_hand_position(kind: HandKeypointKind) -> (f32, f32) {
    use HandKeypointKind::*;
    match kind {
        Wrist => (0.50, 0.85),
        ThumbCmc => (0.46, 0.80),
        ThumbMcp => (0.44, 0.75),
        ThumbIp => (0.43, 0.70),
        ThumbTip => (0.42, 0.66),
        IndexMcp => (0.46, 0.60),
        IndexPip => (0.46, 0.54),
        IndexDip => (0.46, 0.50),
        IndexTip => (0.46, 0.46),
        MiddleMcp => (0.50, 0.59),
        MiddlePip => (0.50, 0.53),
        MiddleDip => (0.50, 0.48),
        MiddleTip => (0.50, 0.44),
        RingMcp => (0.54, 0.60),
        RingPip => (0.54, 0.54),
        RingDip => (0.54, 0.50),
        RingTip => (0.54, 0.46),
        PinkyMcp => (0.58, 0.62),
        PinkyPip => (0.58, 0.57),
        PinkyDip => (0.58, 0.53),
        PinkyTip => (0.58, 0.50),
    }
}
