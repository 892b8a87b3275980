pub mod csv;
pub mod image;
pub mod malform;
pub mod sample;

pub use malform::AugmentConfig;
pub use sample::Sample;
