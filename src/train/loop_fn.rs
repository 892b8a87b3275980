use std::borrow::Cow;
use std::sync::atomic::Ordering;
use std::time::Instant;

use rand::Rng;
use tracing::{info, trace, warn};

use crate::data::sample::Sample;
use crate::error::{NetError, Result};
use crate::network::Model;
use crate::train::progress::{TrainProgress, TrainReport};
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `model` one randomly drawn sample at a time.
///
/// Every step picks a sample uniformly from `samples`, applies
/// `config.augment` to a copy of its pixels, and trains on it against the
/// one-hot target for its label. The loop runs `config.iterations` steps,
/// then keeps going while `config.target_error` is set and the running mean
/// error is still above it (bounded by `config.max_iterations`).
///
/// # Early termination
/// The loop stops early if:
/// - `config.stop_flag` is set to `true`, **or**
/// - the `progress_tx` receiver has been dropped.
///
/// A failed checkpoint write is logged and training continues.
pub fn train_loop<M, R>(model: &mut M, samples: &[Sample], config: &TrainConfig, rng: &mut R) -> Result<TrainReport>
where
    M: Model + ?Sized,
    R: Rng + ?Sized,
{
    config.validate()?;
    if samples.is_empty() {
        return Err(NetError::Dataset("no training samples".into()));
    }

    let output_size = model.output_size();
    let start = Instant::now();

    let mut iteration = 0;
    let mut error_sum = 0.0;
    let mut last_error = 0.0;
    let mut stopped_early = false;

    info!(
        samples = samples.len(),
        iterations = config.iterations,
        target_error = ?config.target_error,
        "training started"
    );

    while should_continue(iteration, error_sum, config) {
        if let Some(ref flag) = config.stop_flag {
            if flag.load(Ordering::Relaxed) {
                info!(iteration, "stop requested");
                stopped_early = true;
                break;
            }
        }

        let sample = &samples[rng.gen_range(0..samples.len())];
        let input: Cow<[f64]> = if config.augment.is_noop() {
            Cow::Borrowed(sample.pixels.as_slice())
        } else {
            Cow::Owned(sample.augmented(&config.augment, config.image_side, rng)?)
        };
        let target = sample.target(output_size)?;

        let error = model.train(&input, &target)?.sum();
        iteration += 1;
        error_sum += error;
        last_error = error;
        trace!(iteration, label = sample.label, error, "trained sample");

        if iteration % config.report_every == 0 {
            let progress = TrainProgress {
                iteration,
                total: config.iterations,
                error,
                mean_error: error_sum / iteration as f64,
                elapsed_ms: start.elapsed().as_millis() as u64,
            };
            info!(
                iteration,
                total = config.iterations,
                error,
                mean_error = progress.mean_error,
                remaining_ms = progress.remaining_ms(),
                "training progress"
            );

            if let Some(ref tx) = config.progress_tx {
                // If the receiver has been dropped, stop training.
                if tx.send(progress).is_err() {
                    stopped_early = true;
                    break;
                }
            }
        }

        if let (Some(every), Some(path)) = (config.checkpoint_every, config.checkpoint_path.as_deref()) {
            if iteration % every == 0 {
                match model.write_to_file(path) {
                    Ok(()) => info!(iteration, path = %path.display(), "wrote checkpoint"),
                    Err(e) => warn!(iteration, path = %path.display(), error = %e, "checkpoint failed"),
                }
            }
        }
    }

    let report = TrainReport {
        iterations: iteration,
        mean_error: if iteration > 0 { error_sum / iteration as f64 } else { 0.0 },
        last_error,
        elapsed_ms: start.elapsed().as_millis() as u64,
        stopped_early,
    };
    info!(
        iterations = report.iterations,
        mean_error = report.mean_error,
        elapsed_ms = report.elapsed_ms,
        "training finished"
    );
    Ok(report)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn should_continue(iteration: usize, error_sum: f64, config: &TrainConfig) -> bool {
    if config.max_iterations.map_or(false, |max| iteration >= max) {
        return false;
    }
    if iteration < config.iterations {
        return true;
    }
    match config.target_error {
        Some(target) => iteration == 0 || error_sum / iteration as f64 > target,
        None => false,
    }
}
