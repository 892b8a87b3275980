pub mod activation;
pub mod data;
pub mod error;
pub mod math;
pub mod network;
pub mod train;

// Convenience re-exports
pub use activation::activation::ActivationFunction;
pub use data::{AugmentConfig, Sample};
pub use error::{NetError, Result};
pub use math::matrix::Matrix;
pub use network::{Model, Network, NetworkSpec};
pub use train::{evaluate, train_loop, TrainConfig};
