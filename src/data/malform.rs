//! Training-time distortion of square grayscale images.
//!
//! Images are flat, row-major `side x side` buffers with values in `[0, 1]`;
//! every function here keeps the buffer length unchanged.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};

/// Noise magnitude used when noise is enabled without an explicit value.
pub const DEFAULT_NOISE: f64 = 0.1;

/// Which distortions to apply to each sample before it is trained on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AugmentConfig {
    /// Move the drawn region to a random place inside the frame.
    pub shift: bool,
    /// Add uniform noise of this magnitude, if set.
    pub noise: Option<f64>,
}

impl AugmentConfig {
    pub fn is_noop(&self) -> bool {
        !self.shift && self.noise.is_none()
    }
}

/// Applies `config` in place: shift first, then noise.
pub fn malform<R>(pixels: &mut [f64], side: usize, config: &AugmentConfig, rng: &mut R) -> Result<()>
where
    R: Rng + ?Sized,
{
    if config.shift {
        random_shift(pixels, side, rng)?;
    }
    if let Some(magnitude) = config.noise {
        add_noise(pixels, magnitude, rng);
    }
    Ok(())
}

/// Translates the bounding box of the non-zero pixels to a uniformly random
/// position that keeps it entirely inside the image. A blank image is left
/// as is.
pub fn random_shift<R>(pixels: &mut [f64], side: usize, rng: &mut R) -> Result<()>
where
    R: Rng + ?Sized,
{
    if pixels.len() != side * side {
        return Err(NetError::ShapeMismatch {
            op: "random_shift",
            left: (side, side),
            right: (pixels.len(), 1),
        });
    }

    let Some((min_x, min_y, max_x, max_y)) = bounding_box(pixels, side) else {
        return Ok(());
    };

    let width = max_x - min_x + 1;
    let height = max_y - min_y + 1;

    let mut packed = Vec::with_capacity(width * height);
    for y in min_y..=max_y {
        packed.extend_from_slice(&pixels[y * side + min_x..=y * side + max_x]);
    }

    let new_x = rng.gen_range(0..=side - width);
    let new_y = rng.gen_range(0..=side - height);

    pixels.fill(0.0);
    for (row, chunk) in packed.chunks(width).enumerate() {
        let start = (new_y + row) * side + new_x;
        pixels[start..start + width].copy_from_slice(chunk);
    }

    Ok(())
}

/// Adds `(u - 0.5) * magnitude` to every pixel, `u` uniform in `[0, 1)`,
/// and clamps the result back into `[0, 1]`.
pub fn add_noise<R>(pixels: &mut [f64], magnitude: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for p in pixels.iter_mut() {
        *p += (rng.gen::<f64>() - 0.5) * magnitude;
        *p = p.clamp(0.0, 1.0);
    }
}

/// `(min_x, min_y, max_x, max_y)` of the pixels above zero, inclusive.
fn bounding_box(pixels: &[f64], side: usize) -> Option<(usize, usize, usize, usize)> {
    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    for (i, &p) in pixels.iter().enumerate() {
        if p > 0.0 {
            let (x, y) = (i % side, i / side);
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }
    bounds
}
