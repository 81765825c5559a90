use super::{Analyzer, Evaluation, KneePhase, Phase, RepState};
use crate::{
    geom::angle_at_vertex,
    landmarks::{Frame, PoseKeypointKind, PoseLandmarks},
};

// Normalized-coordinate margin a knee must clear above the hip to count as
// raised.
const DEFAULT_RAISE_MARGIN: f32 = 0.05;
const QUALITY_SCALE: f32 = 1.2;

/// Counts knee raise-and-lower cycles on either leg. Quality reflects how far
/// the hip-knee-ankle joint is bent: a straight leg scores 0, a fully bent
/// knee scores near 100.
#[derive(Debug, Clone, Copy)]
pub(crate) struct KneeRaise {
    raise_margin: f32,
}

impl Default for KneeRaise {
    fn default() -> Self {
        Self {
            raise_margin: DEFAULT_RAISE_MARGIN,
        }
    }
}

fn knee_angle(pose: &PoseLandmarks, hip: PoseKeypointKind, knee: PoseKeypointKind, ankle: PoseKeypointKind) -> f32 {
    angle_at_vertex(pose.point(hip), pose.point(knee), pose.point(ankle))
}

impl Analyzer for KneeRaise {
    fn evaluate(&self, frame: Frame<'_>, prior: &RepState) -> Evaluation {
        let pose = match frame.pose {
            Some(pose) => pose,
            None => return Evaluation::hold(prior, "Show full body to camera"),
        };

        let left_raised = pose.point(PoseKeypointKind::LeftKnee).y()
            < pose.point(PoseKeypointKind::LeftHip).y() - self.raise_margin;
        let right_raised = pose.point(PoseKeypointKind::RightKnee).y()
            < pose.point(PoseKeypointKind::RightHip).y() - self.raise_margin;
        let raised = left_raised || right_raised;

        let left_angle = knee_angle(
            pose,
            PoseKeypointKind::LeftHip,
            PoseKeypointKind::LeftKnee,
            PoseKeypointKind::LeftAnkle,
        );
        let right_angle = knee_angle(
            pose,
            PoseKeypointKind::RightHip,
            PoseKeypointKind::RightKnee,
            PoseKeypointKind::RightAnkle,
        );
        // Score the active leg; with both (or neither) raised, score the more
        // bent one.
        let angle = if left_raised && !right_raised {
            left_angle
        } else if right_raised && !left_raised {
            right_angle
        } else {
            left_angle.min(right_angle)
        };

        let mut reps = prior.reps;
        let mut phase = prior.phase;

        if raised {
            phase = Phase::Knee(KneePhase::Up);
        } else if phase == Phase::Knee(KneePhase::Up) {
            reps += 1;
            phase = Phase::Knee(KneePhase::Down);
        }

        let quality = ((180.0 - angle) * QUALITY_SCALE).clamp(0.0, 100.0);
        let status = if raised {
            "Knee up, lower it slowly"
        } else {
            "Raise your knee above the hip"
        };

        Evaluation {
            reps,
            phase,
            quality,
            status: status.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::test_util::pose_with;
    use assert_approx_eq::assert_approx_eq;

    fn standing_pose(left_knee_y: f32) -> PoseLandmarks {
        pose_with(&[
            (PoseKeypointKind::LeftHip, 0.45, 0.60),
            (PoseKeypointKind::LeftKnee, 0.45, left_knee_y),
            (PoseKeypointKind::LeftAnkle, 0.45, 0.95),
            (PoseKeypointKind::RightHip, 0.55, 0.60),
            (PoseKeypointKind::RightKnee, 0.55, 0.78),
            (PoseKeypointKind::RightAnkle, 0.55, 0.95),
        ])
    }

    #[test]
    fn raised_knee_sets_phase_up() {
        let pose = standing_pose(0.50);
        let result = KneeRaise::default().evaluate(Frame::with_pose(&pose), &RepState::default());
        assert_eq!(result.reps, 0);
        assert_eq!(result.phase, Phase::Knee(KneePhase::Up));
    }

    #[test]
    fn raise_then_lower_counts_one_rep() {
        let analyzer = KneeRaise::default();
        let mut state = RepState::default();

        let raised = standing_pose(0.50);
        let result = analyzer.evaluate(Frame::with_pose(&raised), &state);
        state.reps = result.reps;
        state.phase = result.phase;

        let lowered = standing_pose(0.78);
        let result = analyzer.evaluate(Frame::with_pose(&lowered), &state);
        assert_eq!(result.reps, 1);
        assert_eq!(result.phase, Phase::Knee(KneePhase::Down));
        state.reps = result.reps;
        state.phase = result.phase;

        // Staying down does not count again.
        let result = analyzer.evaluate(Frame::with_pose(&lowered), &state);
        assert_eq!(result.reps, 1);
        assert_eq!(result.phase, Phase::Knee(KneePhase::Down));
    }

    #[test]
    fn margin_boundary_is_strict() {
        // Knee exactly at hip - margin is not raised.
        let pose = standing_pose(0.55);
        let result = KneeRaise::default().evaluate(Frame::with_pose(&pose), &RepState::default());
        assert_eq!(result.phase, Phase::Idle);
    }

    #[test]
    fn lowering_without_prior_raise_does_not_count() {
        let pose = standing_pose(0.78);
        let result = KneeRaise::default().evaluate(Frame::with_pose(&pose), &RepState::default());
        assert_eq!(result.reps, 0);
        assert_eq!(result.phase, Phase::Idle);
    }

    #[test]
    fn straight_leg_scores_zero_bent_knee_scores_high() {
        // Collinear hip/knee/ankle: 180°, quality 0.
        let straight = standing_pose(0.78);
        let result =
            KneeRaise::default().evaluate(Frame::with_pose(&straight), &RepState::default());
        assert_approx_eq!(result.quality, 0.0, 1e-2);

        // Right-angle bend on the raised leg: (180 - 90) * 1.2 = 108, clamped.
        let bent = pose_with(&[
            (PoseKeypointKind::LeftHip, 0.50, 0.60),
            (PoseKeypointKind::LeftKnee, 0.50, 0.50),
            (PoseKeypointKind::LeftAnkle, 0.60, 0.50),
            (PoseKeypointKind::RightHip, 0.55, 0.60),
            (PoseKeypointKind::RightKnee, 0.55, 0.78),
            (PoseKeypointKind::RightAnkle, 0.55, 0.95),
        ]);
        let result = KneeRaise::default().evaluate(Frame::with_pose(&bent), &RepState::default());
        assert_eq!(result.phase, Phase::Knee(KneePhase::Up));
        assert_approx_eq!(result.quality, 100.0, 1e-3);
    }

    #[test]
    fn either_leg_can_trigger_the_raise() {
        let pose = pose_with(&[
            (PoseKeypointKind::LeftHip, 0.45, 0.60),
            (PoseKeypointKind::LeftKnee, 0.45, 0.78),
            (PoseKeypointKind::LeftAnkle, 0.45, 0.95),
            (PoseKeypointKind::RightHip, 0.55, 0.60),
            (PoseKeypointKind::RightKnee, 0.55, 0.50),
            (PoseKeypointKind::RightAnkle, 0.55, 0.95),
        ]);
        let result = KneeRaise::default().evaluate(Frame::with_pose(&pose), &RepState::default());
        assert_eq!(result.phase, Phase::Knee(KneePhase::Up));
    }

    #[test]
    fn missing_pose_reports_visibility() {
        let prior = RepState {
            reps: 6,
            phase: Phase::Knee(KneePhase::Up),
        };
        let result = KneeRaise::default().evaluate(Frame::empty(), &prior);
        assert_eq!(result.status, "Show full body to camera");
        assert_eq!(result.reps, 6);
        assert_eq!(result.phase, prior.phase);
        assert_eq!(result.quality, 0.0);
    }
}
