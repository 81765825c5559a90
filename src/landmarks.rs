use crate::{error::Error, geom::Point};
use std::convert::TryInto;

/// Body keypoint indices as produced by the upstream pose detector.
#[derive(Debug, Copy, Clone, PartialEq, Eq, num_derive::FromPrimitive, num_derive::ToPrimitive)]
pub(crate) enum PoseKeypointKind {
    Nose,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

/// Hand keypoint indices as produced by the upstream hand detector.
#[derive(Debug, Copy, Clone, PartialEq, Eq, num_derive::FromPrimitive, num_derive::ToPrimitive)]
pub(crate) enum HandKeypointKind {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

pub(crate) const NUM_POSE_KEYPOINTS: usize = 33;
pub(crate) const NUM_HAND_KEYPOINTS: usize = 21;

/// One body detection for one frame: 33 keypoints at fixed detector indices.
#[derive(Debug, Copy, Clone)]
pub(crate) struct PoseLandmarks {
    points: [Point; NUM_POSE_KEYPOINTS],
}

impl PoseLandmarks {
    pub(crate) fn new(points: &[Point]) -> Result<Self, Error> {
        Ok(Self {
            points: points
                .try_into()
                .map_err(|_| Error::PoseLandmarkCount(points.len()))?,
        })
    }

    #[inline]
    pub(crate) fn point(&self, kind: PoseKeypointKind) -> Point {
        self.points[kind as usize]
    }
}

impl From<[Point; NUM_POSE_KEYPOINTS]> for PoseLandmarks {
    fn from(points: [Point; NUM_POSE_KEYPOINTS]) -> Self {
        Self { points }
    }
}

/// One hand detection for one frame: 21 keypoints at fixed detector indices.
#[derive(Debug, Copy, Clone)]
pub(crate) struct HandLandmarks {
    points: [Point; NUM_HAND_KEYPOINTS],
}

impl HandLandmarks {
    pub(crate) fn new(points: &[Point]) -> Result<Self, Error> {
        Ok(Self {
            points: points
                .try_into()
                .map_err(|_| Error::HandLandmarkCount(points.len()))?,
        })
    }

    #[inline]
    pub(crate) fn point(&self, kind: HandKeypointKind) -> Point {
        self.points[kind as usize]
    }
}

impl From<[Point; NUM_HAND_KEYPOINTS]> for HandLandmarks {
    fn from(points: [Point; NUM_HAND_KEYPOINTS]) -> Self {
        Self { points }
    }
}

/// The detections available for one video frame. Either set may be absent when
/// the detector loses the subject.
#[derive(Debug, Copy, Clone, Default)]
pub(crate) struct Frame<'a> {
    pub(crate) pose: Option<&'a PoseLandmarks>,
    pub(crate) hand: Option<&'a HandLandmarks>,
}

#[cfg(test)]
impl<'a> Frame<'a> {
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn with_pose(pose: &'a PoseLandmarks) -> Self {
        Self {
            pose: Some(pose),
            hand: None,
        }
    }

    pub(crate) fn with_hand(hand: &'a HandLandmarks) -> Self {
        Self {
            pose: None,
            hand: Some(hand),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::{
        HandKeypointKind, HandLandmarks, PoseKeypointKind, PoseLandmarks, NUM_HAND_KEYPOINTS,
        NUM_POSE_KEYPOINTS,
    };
    use crate::geom::Point;

    /// Build a pose set where every keypoint sits at (0.5, 0.5) except the
    /// listed overrides.
    pub(crate) fn pose_with(overrides: &[(PoseKeypointKind, f32, f32)]) -> PoseLandmarks {
        let mut points = [Point::new(0.5, 0.5).unwrap(); NUM_POSE_KEYPOINTS];
        for &(kind, x, y) in overrides {
            points[kind as usize] = Point::new(x, y).unwrap();
        }
        PoseLandmarks::from(points)
    }

    /// Build a hand set where every keypoint sits at (0.5, 0.5) except the
    /// listed overrides.
    pub(crate) fn hand_with(overrides: &[(HandKeypointKind, f32, f32)]) -> HandLandmarks {
        let mut points = [Point::new(0.5, 0.5).unwrap(); NUM_HAND_KEYPOINTS];
        for &(kind, x, y) in overrides {
            points[kind as usize] = Point::new(x, y).unwrap();
        }
        HandLandmarks::from(points)
    }
}
