use super::{Analyzer, Evaluation, Phase, RepState, Side};
use crate::landmarks::{Frame, PoseKeypointKind};

const DEFAULT_YAW_THRESHOLD_DEGREES: f32 = 25.0;
const QUALITY_SCALE: f32 = 70.0;

/// Counts full right-to-left (and left-to-right) head sweeps. Yaw is
/// estimated from how far the nose sits from the shoulder midpoint,
/// normalized by the shoulder span.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HeadTurn {
    yaw_threshold_degrees: f32,
}

impl Default for HeadTurn {
    fn default() -> Self {
        Self {
            yaw_threshold_degrees: DEFAULT_YAW_THRESHOLD_DEGREES,
        }
    }
}

impl Analyzer for HeadTurn {
    fn evaluate(&self, frame: Frame<'_>, prior: &RepState) -> Evaluation {
        let pose = match frame.pose {
            Some(pose) => pose,
            None => return Evaluation::hold(prior, "Show your shoulders and head"),
        };

        let nose = pose.point(PoseKeypointKind::Nose);
        let left_shoulder = pose.point(PoseKeypointKind::LeftShoulder);
        let right_shoulder = pose.point(PoseKeypointKind::RightShoulder);

        let span = (left_shoulder.x() - right_shoulder.x()).abs();
        if span == 0.0 {
            return Evaluation::hold(prior, "Hold steady");
        }

        let mid_x = (left_shoulder.x() + right_shoulder.x()) / 2.0;
        let ratio = ((nose.x() - mid_x) / span).clamp(-1.0, 1.0);
        let yaw = ratio.asin().to_degrees();

        let mut reps = prior.reps;
        let mut phase = prior.phase;

        if yaw > self.yaw_threshold_degrees && phase != Phase::Head(Side::Right) {
            // A full sweep from the opposite zone is one repetition; the very
            // first zone entry only arms the counter.
            if phase == Phase::Head(Side::Left) {
                reps += 1;
            }
            phase = Phase::Head(Side::Right);
        } else if yaw < -self.yaw_threshold_degrees && phase != Phase::Head(Side::Left) {
            if phase == Phase::Head(Side::Right) {
                reps += 1;
            }
            phase = Phase::Head(Side::Left);
        }

        let quality = (yaw.abs() / self.yaw_threshold_degrees * QUALITY_SCALE).clamp(0.0, 100.0);

        Evaluation {
            reps,
            phase,
            quality,
            status: format!("Yaw {:.0}°", yaw),
        }
    }
}
