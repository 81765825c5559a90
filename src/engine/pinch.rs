use super::{Analyzer, Evaluation, Phase, PinchPhase, RepState};
use crate::landmarks::{Frame, HandKeypointKind};

const DEFAULT_CLOSE_THRESHOLD: f32 = 0.25;
const DEFAULT_OPEN_THRESHOLD: f32 = 0.45;
// Minimum wrist-to-thumb reference length; keeps the normalization sane when
// the detector collapses the hand.
const MIN_SCALE: f32 = 0.1;
const QUALITY_SCALE: f32 = 200.0;

/// Counts pinch-and-release cycles of thumb and index fingertips. The gap is
/// normalized by the wrist-to-thumb length so the thresholds hold at any
/// distance from the camera. The band between the two thresholds holds the
/// last phase, acting as hysteresis against jitter.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FingerPinch {
    close_threshold: f32,
    open_threshold: f32,
}

impl Default for FingerPinch {
    fn default() -> Self {
        Self {
            close_threshold: DEFAULT_CLOSE_THRESHOLD,
            open_threshold: DEFAULT_OPEN_THRESHOLD,
        }
    }
}

impl Analyzer for FingerPinch {
    fn evaluate(&self, frame: Frame<'_>, prior: &RepState) -> Evaluation {
        let hand = match frame.hand {
            Some(hand) => hand,
            None => return Evaluation::hold(prior, "Show your hand to the camera"),
        };

        let wrist = hand.point(HandKeypointKind::Wrist);
        let thumb_tip = hand.point(HandKeypointKind::ThumbTip);
        let index_tip = hand.point(HandKeypointKind::IndexTip);

        let scale = wrist.distance(thumb_tip).max(MIN_SCALE);
        let norm = thumb_tip.distance(index_tip) / scale;

        let mut reps = prior.reps;
        let mut phase = prior.phase;
        let status;

        if norm < self.close_threshold {
            phase = Phase::Pinch(PinchPhase::Pinched);
            status = "Pinched, now spread your fingers";
        } else if norm > self.open_threshold {
            if phase == Phase::Pinch(PinchPhase::Pinched) {
                reps += 1;
                phase = Phase::Pinch(PinchPhase::Released);
            }
            status = "Released, pinch again";
        } else {
            status = "Keep going";
        }

        let quality = ((self.open_threshold - norm) * QUALITY_SCALE).clamp(0.0, 100.0);

        Evaluation {
            reps,
            phase,
            quality,
            status: status.to_owned(),
        }
    }
}
