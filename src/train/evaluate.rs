use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::data::malform::AugmentConfig;
use crate::data::sample::Sample;
use crate::error::{NetError, Result};
use crate::network::{largest_index, Model};

/// Hits and totals for one output class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassStats {
    pub correct: usize,
    pub count: usize,
}

/// Classification results over a labelled set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Indexed by label; one entry per network output.
    pub classes: Vec<ClassStats>,
    pub correct: usize,
    pub total: usize,
    /// Mean over samples of the summed squared error against the one-hot target.
    pub mean_error: f64,
}

impl Evaluation {
    /// Fraction of samples whose largest output matched the label.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }

    /// Accuracy for one class, `None` if the class never occurred.
    pub fn class_accuracy(&self, class: usize) -> Option<f64> {
        self.classes
            .get(class)
            .filter(|c| c.count > 0)
            .map(|c| c.correct as f64 / c.count as f64)
    }
}

/// Feeds every sample as-is and tallies argmax hits per class.
pub fn evaluate<M>(model: &M, samples: &[Sample]) -> Result<Evaluation>
where
    M: Model + ?Sized,
{
    tally(model, samples, |s| Ok(s.pixels.clone()))
}

/// Like [`evaluate`], but distorts each sample with `augment` first.
pub fn evaluate_augmented<M, R>(
    model: &M,
    samples: &[Sample],
    augment: &AugmentConfig,
    image_side: usize,
    rng: &mut R,
) -> Result<Evaluation>
where
    M: Model + ?Sized,
    R: Rng + ?Sized,
{
    tally(model, samples, |s| s.augmented(augment, image_side, &mut *rng))
}

fn tally<M, F>(model: &M, samples: &[Sample], mut input_for: F) -> Result<Evaluation>
where
    M: Model + ?Sized,
    F: FnMut(&Sample) -> Result<Vec<f64>>,
{
    if samples.is_empty() {
        return Err(NetError::Dataset("no evaluation samples".into()));
    }

    let output_size = model.output_size();
    let mut classes = vec![ClassStats::default(); output_size];
    let mut correct = 0;
    let mut error_sum = 0.0;

    for sample in samples {
        let target = sample.target(output_size)?;
        let output = model.feed(&input_for(sample)?)?;

        error_sum += output.iter().zip(&target).map(|(o, t)| (o - t).powi(2)).sum::<f64>();

        let stats = &mut classes[sample.label];
        stats.count += 1;
        if largest_index(&output) == sample.label {
            stats.correct += 1;
            correct += 1;
        }
    }

    let evaluation = Evaluation {
        classes,
        correct,
        total: samples.len(),
        mean_error: error_sum / samples.len() as f64,
    };
    info!(
        correct,
        total = evaluation.total,
        accuracy = evaluation.accuracy(),
        mean_error = evaluation.mean_error,
        "evaluated"
    );
    Ok(evaluation)
}
