use serde::{Deserialize, Serialize};

/// Snapshot emitted by `train_loop` every `report_every` steps.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, one value is
/// sent per report; receivers use it to drive progress output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainProgress {
    /// 1-based step number.
    pub iteration: usize,
    /// Steps requested for this run (may be exceeded when chasing `target_error`).
    pub total: usize,
    /// Summed squared error of the latest step.
    pub error: f64,
    /// Mean of `error` over every step so far.
    pub mean_error: f64,
    pub elapsed_ms: u64,
}

impl TrainProgress {
    /// Estimated milliseconds left to reach `total`, from the mean step time.
    pub fn remaining_ms(&self) -> u64 {
        if self.iteration == 0 || self.iteration >= self.total {
            return 0;
        }
        let per_step = self.elapsed_ms as f64 / self.iteration as f64;
        (per_step * (self.total - self.iteration) as f64) as u64
    }
}

/// Summary returned when `train_loop` finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainReport {
    pub iterations: usize,
    pub mean_error: f64,
    pub last_error: f64,
    pub elapsed_ms: u64,
    /// `true` when a stop flag or a dropped progress receiver ended the run.
    pub stopped_early: bool,
}
