//! Image-file input for square grayscale networks.
//!
//! Decodes PNG/JPEG/BMP/GIF bytes, resizes to `side x side`, converts to
//! grayscale and normalizes to `[0, 1]`, producing the flat row-major vector
//! a digit network expects. Networks trained on light-on-dark strokes need
//! `invert` for ordinary dark-on-light drawings.

use std::path::Path;

use image::imageops::FilterType;

use crate::error::Result;

pub fn image_to_grayscale_input(bytes: &[u8], side: u32, invert: bool) -> Result<Vec<f64>> {
    let img = image::load_from_memory(bytes)?;
    let resized = img.resize_exact(side, side, FilterType::Lanczos3);
    let gray = resized.to_luma8();
    Ok(gray
        .pixels()
        .map(|p| {
            let v = p.0[0] as f64 / 255.0;
            if invert {
                1.0 - v
            } else {
                v
            }
        })
        .collect())
}

pub fn load_image_input<P: AsRef<Path>>(path: P, side: u32, invert: bool) -> Result<Vec<f64>> {
    let bytes = std::fs::read(path)?;
    image_to_grayscale_input(&bytes, side, invert)
}
