use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::channel,
        Arc,
    },
    time::Duration,
};
use structopt::StructOpt;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;

mod engine;
mod error;
mod exercise;
mod geom;
mod landmarks;
mod script;
mod session;

/// Replay a scripted rehabilitation session through the evaluation engine.
#[derive(structopt::StructOpt)]
struct Opt {
    /// Exercise identifier: head, finger, hand, leg or shoulder.
    #[structopt(default_value = "head")]
    exercise: exercise::Exercise,

    /// Scripted subject frame rate.
    #[structopt(short, long, default_value = "30")]
    fps: u32,

    /// Stop after this many frames (0 = run until Ctrl-C).
    #[structopt(short = "-n", long, default_value = "0")]
    frames: u64,

    #[structopt(short, long, default_value = "info", env = "RUST_LOG")]
    log_level: tracing_subscriber::filter::EnvFilter,

    #[structopt(short, long)]
    show_progress: bool,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    let exercise = opt.exercise;
    let info = exercise.info();

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(opt.log_level),
    )?;

    info!(
        message = "starting scripted session",
        exercise = %exercise,
        name = info.name,
        target_reps = info.target_reps,
        difficulty = ?info.difficulty,
    );
    for instruction in info.instructions {
        info!(message = "instruction", text = *instruction);
    }

    let running = Arc::new(AtomicBool::new(true));
    let running_ctrl_c = running.clone();

    ctrlc::set_handler(move || {
        running_ctrl_c.store(false, Ordering::SeqCst);
    })
    .context("failed setting Ctrl-C handler")?;

    let pb_live = if opt.show_progress {
        Some(
            ProgressBar::new_spinner().with_style(
                ProgressStyle::default_spinner()
                    .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
                    .template("{prefix:.bold.dim} {spinner} {wide_msg}"),
            ),
        )
    } else {
        None
    };

    let frame_interval = Duration::from_secs_f64(1.0 / f64::from(opt.fps.max(1)));
    let max_frames = opt.frames;

    let (frames_tx, frames_rx) = channel();
    let (snapshots_tx, snapshots_rx) = channel();

    let running_produce = running.clone();
    let running_evaluate = running.clone();

    crossbeam::thread::scope(|scope| {
        scope.spawn(move |_| {
            let subject = script::ScriptedSubject::new(exercise);
            let mut index = 0;
            while running_produce.load(Ordering::SeqCst) && (max_frames == 0 || index < max_frames)
            {
                let frame = subject
                    .frame(index)
                    .context("failed generating scripted frame")?;
                frames_tx.send(frame)?;
                index += 1;
                std::thread::sleep(frame_interval);
            }
            Ok::<_, anyhow::Error>(())
        });

        scope.spawn(move |_| {
            let mut tracker = session::SessionTracker::new(exercise);
            while running_evaluate.load(Ordering::SeqCst) {
                let scripted = match frames_rx.recv() {
                    Ok(scripted) => scripted,
                    Err(_) => break,
                };
                let evaluation =
                    engine::evaluate(exercise.id(), scripted.as_frame(), tracker.state());
                debug!(
                    reps = evaluation.reps,
                    phase = %evaluation.phase,
                    quality = evaluation.quality,
                    status = %evaluation.status,
                );
                let snapshot = tracker.observe(&evaluation);
                snapshots_tx.send(snapshot)?;
            }

            let summary = tracker.finish();
            info!(
                message = "session complete",
                exercise = %summary.exercise,
                reps = summary.reps,
                avg_quality = summary.avg_quality,
                duration_secs = summary.duration.as_secs_f64(),
                speed_rpm = summary.speed_rpm,
                stability = summary.stability,
                form_score = summary.form_score,
            );
            Ok::<_, anyhow::Error>(())
        });

        while let Ok(snapshot) = snapshots_rx.recv() {
            if !running.load(Ordering::SeqCst) {
                break;
            }
            let line = format!(
                "rep {}/{} ({:.0}%) | quality {:.0} | form {:.0} | {:.1} reps/min | stability {:.0} | {}",
                snapshot.reps,
                snapshot.target_reps,
                snapshot.progress_pct,
                snapshot.quality,
                snapshot.form_score,
                snapshot.speed_rpm,
                snapshot.stability,
                snapshot.status,
            );
            if let Some(pb_live) = pb_live.as_ref() {
                pb_live.set_message(line);
                pb_live.inc(1);
            } else {
                debug!(message = "live snapshot", line = %line);
            }
        }

        running.store(false, Ordering::SeqCst);
        Ok(())
    })
    .unwrap()
}
