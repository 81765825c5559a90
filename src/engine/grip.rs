use super::{Analyzer, Evaluation, GripPhase, Phase, RepState};
use crate::landmarks::{Frame, HandKeypointKind};

// Fingertip paired with its base knuckle, thumb excluded.
const FINGERS: [(HandKeypointKind, HandKeypointKind); 4] = [
    (HandKeypointKind::IndexTip, HandKeypointKind::IndexMcp),
    (HandKeypointKind::MiddleTip, HandKeypointKind::MiddleMcp),
    (HandKeypointKind::RingTip, HandKeypointKind::RingMcp),
    (HandKeypointKind::PinkyTip, HandKeypointKind::PinkyMcp),
];

const OPEN_MIN_EXTENDED: usize = 3;
const FIST_MAX_EXTENDED: usize = 1;
const QUALITY_PER_FINGER: f32 = 25.0;

/// Counts open-hand to fist cycles. A finger counts as extended when its tip
/// sits above its base knuckle in frame coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct HandOpenClose;

impl Analyzer for HandOpenClose {
    fn evaluate(&self, frame: Frame<'_>, prior: &RepState) -> Evaluation {
        let hand = match frame.hand {
            Some(hand) => hand,
            None => return Evaluation::hold(prior, "Show your hand to the camera"),
        };

        let extended = FINGERS
            .iter()
            .filter(|&&(tip, base)| hand.point(tip).y() < hand.point(base).y())
            .count();

        let mut reps = prior.reps;
        let mut phase = prior.phase;

        if extended >= OPEN_MIN_EXTENDED {
            phase = Phase::Grip(GripPhase::Open);
        } else if extended <= FIST_MAX_EXTENDED && phase == Phase::Grip(GripPhase::Open) {
            reps += 1;
            phase = Phase::Grip(GripPhase::Fist);
        }

        let quality = (extended as f32 * QUALITY_PER_FINGER).min(100.0);
        let status = if extended >= OPEN_MIN_EXTENDED {
            "Open"
        } else {
            "Fist"
        };

        Evaluation {
            reps,
            phase,
            quality,
            status: status.to_owned(),
        }
    }
}
