use crate::{
    engine::{Evaluation, RepState},
    exercise::Exercise,
};
use std::time::{Duration, Instant};

/// Per-frame snapshot handed to the live-status observer.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LiveSnapshot {
    pub(crate) reps: u32,
    pub(crate) target_reps: u32,
    pub(crate) quality: f32,
    pub(crate) progress_pct: f32,
    pub(crate) status: String,
    pub(crate) speed_rpm: f64,
    pub(crate) stability: f32,
    pub(crate) form_score: f32,
}

/// End-of-session aggregate handed to persistence.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SessionSummary {
    pub(crate) exercise: Exercise,
    pub(crate) reps: u32,
    pub(crate) avg_quality: f32,
    pub(crate) duration: Duration,
    pub(crate) speed_rpm: f64,
    pub(crate) stability: f32,
    pub(crate) form_score: f32,
}

/// Repetitions per minute; zero when no time has elapsed yet.
pub(crate) fn reps_per_minute(reps: u32, elapsed: Duration) -> f64 {
    let minutes = elapsed.as_secs_f64() / 60.0;
    if minutes > 0.0 {
        f64::from(reps) / minutes
    } else {
        0.0
    }
}

/// Caller-side session bookkeeping around the engine: owns the `RepState`
/// threaded through each frame, accumulates per-frame quality, and derives the
/// display and persistence metrics the engine itself does not compute.
#[derive(Debug)]
pub(crate) struct SessionTracker {
    exercise: Exercise,
    target_reps: u32,
    state: RepState,
    started: Instant,
    qualities: Vec<f32>,
}

impl SessionTracker {
    pub(crate) fn new(exercise: Exercise) -> Self {
        Self {
            exercise,
            target_reps: exercise.info().target_reps,
            state: RepState::default(),
            started: Instant::now(),
            qualities: Vec::new(),
        }
    }

    pub(crate) fn state(&self) -> &RepState {
        &self.state
    }

    /// Restart the session: counters back to `{0, idle}`, aggregates cleared.
    pub(crate) fn reset(&mut self) {
        self.state.reset();
        self.started = Instant::now();
        self.qualities.clear();
    }

    /// Fold one frame's evaluation into the session and produce the live
    /// snapshot for display.
    pub(crate) fn observe(&mut self, evaluation: &Evaluation) -> LiveSnapshot {
        self.state.reps = evaluation.reps;
        self.state.phase = evaluation.phase;
        self.qualities.push(evaluation.quality);

        LiveSnapshot {
            reps: self.state.reps,
            target_reps: self.target_reps,
            quality: evaluation.quality,
            progress_pct: self.progress_pct(),
            status: evaluation.status.clone(),
            speed_rpm: reps_per_minute(self.state.reps, self.started.elapsed()),
            stability: self.stability(),
            form_score: self.avg_quality(),
        }
    }

    pub(crate) fn finish(self) -> SessionSummary {
        let duration = self.started.elapsed();
        SessionSummary {
            exercise: self.exercise,
            reps: self.state.reps,
            avg_quality: self.avg_quality(),
            duration,
            speed_rpm: reps_per_minute(self.state.reps, duration),
            stability: self.stability(),
            form_score: self.avg_quality(),
        }
    }

    fn progress_pct(&self) -> f32 {
        (self.state.reps as f32 / self.target_reps as f32 * 100.0).min(100.0)
    }

    fn avg_quality(&self) -> f32 {
        if self.qualities.is_empty() {
            return 0.0;
        }
        self.qualities.iter().sum::<f32>() / self.qualities.len() as f32
    }

    /// 100 minus the mean absolute deviation of per-frame quality: a steady
    /// posture scores high, an erratic one low.
    fn stability(&self) -> f32 {
        if self.qualities.is_empty() {
            return 0.0;
        }
        let mean = self.avg_quality();
        let mad = self
            .qualities
            .iter()
            .map(|quality| (quality - mean).abs())
            .sum::<f32>()
            / self.qualities.len() as f32;
        (100.0 - mad).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Phase;
    use assert_approx_eq::assert_approx_eq;

    fn evaluation(reps: u32, quality: f32) -> Evaluation {
        Evaluation {
            reps,
            phase: Phase::Idle,
            quality,
            status: "ok".to_owned(),
        }
    }

    #[test]
    fn reps_per_minute_guards_zero_elapsed() {
        assert_eq!(reps_per_minute(5, Duration::from_secs(0)), 0.0);
        assert_approx_eq!(reps_per_minute(10, Duration::from_secs(60)), 10.0);
        assert_approx_eq!(reps_per_minute(5, Duration::from_secs(30)), 10.0);
    }

    #[test]
    fn observe_threads_state_and_averages_quality() {
        let mut tracker = SessionTracker::new(Exercise::HeadTurn);
        tracker.observe(&evaluation(0, 40.0));
        let snapshot = tracker.observe(&evaluation(1, 60.0));
        assert_eq!(snapshot.reps, 1);
        assert_eq!(tracker.state().reps, 1);
        assert_approx_eq!(snapshot.form_score, 50.0);
        assert_approx_eq!(snapshot.quality, 60.0);
    }

    #[test]
    fn progress_is_capped_at_one_hundred_percent() {
        let mut tracker = SessionTracker::new(Exercise::HeadTurn);
        let target = Exercise::HeadTurn.info().target_reps;
        let snapshot = tracker.observe(&evaluation(target * 3, 80.0));
        assert_approx_eq!(snapshot.progress_pct, 100.0);

        let mut tracker = SessionTracker::new(Exercise::HeadTurn);
        let snapshot = tracker.observe(&evaluation(target / 2, 80.0));
        assert!(snapshot.progress_pct < 100.0);
    }

    #[test]
    fn steady_quality_scores_full_stability() {
        let mut tracker = SessionTracker::new(Exercise::KneeRaise);
        for _ in 0..10 {
            tracker.observe(&evaluation(0, 75.0));
        }
        let summary = tracker.finish();
        assert_approx_eq!(summary.stability, 100.0);
        assert_approx_eq!(summary.avg_quality, 75.0);
    }

    #[test]
    fn erratic_quality_lowers_stability() {
        let mut tracker = SessionTracker::new(Exercise::KneeRaise);
        for i in 0..10 {
            let quality = if i % 2 == 0 { 0.0 } else { 100.0 };
            tracker.observe(&evaluation(0, quality));
        }
        // Mean 50, every frame deviates by 50.
        let summary = tracker.finish();
        assert_approx_eq!(summary.stability, 50.0);
    }

    #[test]
    fn reset_restores_the_neutral_state() {
        let mut tracker = SessionTracker::new(Exercise::FingerPinch);
        tracker.observe(&evaluation(4, 90.0));
        tracker.reset();
        assert_eq!(tracker.state(), &RepState::default());
        let summary = tracker.finish();
        assert_eq!(summary.reps, 0);
        assert_eq!(summary.avg_quality, 0.0);
    }

    #[test]
    fn empty_session_summarizes_to_zeros() {
        let summary = SessionTracker::new(Exercise::ShoulderRaise).finish();
        assert_eq!(summary.reps, 0);
        assert_eq!(summary.avg_quality, 0.0);
        assert_eq!(summary.stability, 0.0);
    }
}
