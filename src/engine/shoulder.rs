use super::{Analyzer, Evaluation, Phase, RepState};
use crate::{
    geom::Point,
    landmarks::{Frame, PoseKeypointKind},
};

const DEFAULT_LIFT_DEGREES: f32 = 60.0;
const DEFAULT_RELAX_DEGREES: f32 = 40.0;
const QUALITY_DIVISOR: f32 = 1.2;

/// Counts shoulder shrugs, tracking both sides independently; one frame can
/// therefore count two repetitions. Elevation is the vertical ear-to-shoulder
/// distance normalized by the shoulder span and mapped to an angle proxy: a
/// relaxed shoulder reads low, a full shrug reads high.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ShoulderRaise {
    lift_degrees: f32,
    relax_degrees: f32,
}

impl Default for ShoulderRaise {
    fn default() -> Self {
        Self {
            lift_degrees: DEFAULT_LIFT_DEGREES,
            relax_degrees: DEFAULT_RELAX_DEGREES,
        }
    }
}

fn elevation_degrees(ear: Point, shoulder: Point, span: f32) -> f32 {
    let ratio = (ear.y() - shoulder.y()).abs() / span;
    (1.0 - ratio) * 180.0
}

impl Analyzer for ShoulderRaise {
    fn evaluate(&self, frame: Frame<'_>, prior: &RepState) -> Evaluation {
        let pose = match frame.pose {
            Some(pose) => pose,
            None => return Evaluation::hold(prior, "Show upper body"),
        };

        let left_shoulder = pose.point(PoseKeypointKind::LeftShoulder);
        let right_shoulder = pose.point(PoseKeypointKind::RightShoulder);
        let span = (left_shoulder.x() - right_shoulder.x()).abs();
        if span == 0.0 {
            return Evaluation::hold(prior, "Hold steady");
        }

        let left_angle =
            elevation_degrees(pose.point(PoseKeypointKind::LeftEar), left_shoulder, span);
        let right_angle = elevation_degrees(
            pose.point(PoseKeypointKind::RightEar),
            right_shoulder,
            span,
        );

        // Any prior phase that is not already shoulder-shaped reads as "no
        // sides held" rather than being rejected.
        let (mut left_held, mut right_held) = match prior.phase {
            Phase::Shoulder {
                left_held,
                right_held,
            } => (left_held, right_held),
            _ => (false, false),
        };
        let mut reps = prior.reps;

        if left_angle > self.lift_degrees && !left_held {
            reps += 1;
            left_held = true;
        } else if left_angle < self.relax_degrees && left_held {
            left_held = false;
        }

        if right_angle > self.lift_degrees && !right_held {
            reps += 1;
            right_held = true;
        } else if right_angle < self.relax_degrees && right_held {
            right_held = false;
        }

        let quality = (left_angle.max(right_angle) / QUALITY_DIVISOR).clamp(0.0, 100.0);

        Evaluation {
            reps,
            phase: Phase::Shoulder {
                left_held,
                right_held,
            },
            quality,
            status: format!("L {:.0}° R {:.0}°", left_angle, right_angle),
        }
    }
}
