use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{atomic::AtomicBool, Arc};

use crate::data::malform::AugmentConfig;
use crate::error::{NetError, Result};
use crate::train::progress::TrainProgress;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `iterations`      : number of single-sample gradient steps
/// - `target_error`    : keep training past `iterations` while the running
///                        mean error is above this
/// - `max_iterations`  : hard stop, whatever `target_error` says
/// - `augment`         : distortions applied to each sample before training
/// - `image_side`      : side length of square image inputs (needed by `augment.shift`)
/// - `report_every`    : log and emit a `TrainProgress` every this many steps
/// - `checkpoint_every`: write `checkpoint_path` every this many steps
/// - `progress_tx`     : optional channel sender; if the receiver is dropped
///                        the loop stops at the next report
/// - `stop_flag`       : optional atomic flag; when set to `true` from another
///                        thread the loop stops before the next step
pub struct TrainConfig {
    pub iterations: usize,
    pub target_error: Option<f64>,
    pub max_iterations: Option<usize>,
    pub augment: AugmentConfig,
    pub image_side: usize,
    pub report_every: usize,
    pub checkpoint_every: Option<usize>,
    pub checkpoint_path: Option<PathBuf>,
    pub progress_tx: Option<mpsc::Sender<TrainProgress>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Plain fixed-length run: no augmentation, reports every 1000 steps,
    /// no checkpoints, no channel, no stop flag.
    pub fn new(iterations: usize) -> Self {
        TrainConfig {
            iterations,
            target_error: None,
            max_iterations: None,
            augment: AugmentConfig::default(),
            image_side: 0,
            report_every: 1000,
            checkpoint_every: None,
            checkpoint_path: None,
            progress_tx: None,
            stop_flag: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.report_every == 0 {
            return Err(NetError::Config("report_every must be at least 1".into()));
        }
        if self.checkpoint_every == Some(0) {
            return Err(NetError::Config("checkpoint_every must be at least 1".into()));
        }
        if self.checkpoint_every.is_some() && self.checkpoint_path.is_none() {
            return Err(NetError::Config("checkpoint_every is set but checkpoint_path is not".into()));
        }
        if let Some(target) = self.target_error {
            if !(target.is_finite() && target >= 0.0) {
                return Err(NetError::Config(format!("target_error must be non-negative, got {}", target)));
            }
        }
        if self.augment.shift && self.image_side == 0 {
            return Err(NetError::Config("shift augmentation needs image_side".into()));
        }
        Ok(())
    }
}
