use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::malform::{malform, AugmentConfig};
use crate::error::{NetError, Result};

/// One labelled training/test example: a class index and its input vector
/// (pixels normalized to `[0, 1]` for image data).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub label: usize,
    pub pixels: Vec<f64>,
}

impl Sample {
    pub fn new(label: usize, pixels: Vec<f64>) -> Self {
        Sample { label, pixels }
    }

    /// One-hot target vector of length `output_size`.
    pub fn target(&self, output_size: usize) -> Result<Vec<f64>> {
        if self.label >= output_size {
            return Err(NetError::Dataset(format!(
                "label {} out of range for {} outputs",
                self.label, output_size
            )));
        }
        let mut one_hot = vec![0.0; output_size];
        one_hot[self.label] = 1.0;
        Ok(one_hot)
    }

    /// A copy of the pixels with `config` applied; the stored sample is left
    /// untouched so every call sees the original image.
    pub fn augmented<R>(&self, config: &AugmentConfig, side: usize, rng: &mut R) -> Result<Vec<f64>>
    where
        R: Rng + ?Sized,
    {
        let mut pixels = self.pixels.clone();
        malform(&mut pixels, side, config, rng)?;
        Ok(pixels)
    }
}
