pub mod network;
pub mod spec;

pub use network::{largest_index, Network, DEFAULT_LEARNING_RATE};
pub use spec::NetworkSpec;

use crate::error::Result;
use crate::math::matrix::Matrix;

/// What the training loop, the evaluator and the CLI need from a network.
///
/// [`Network`] is the only implementation; the trait keeps those callers
/// independent of its layout.
pub trait Model {
    fn input_size(&self) -> usize;

    fn output_size(&self) -> usize;

    fn feed(&self, input: &[f64]) -> Result<Vec<f64>>;

    /// One gradient step; returns the squared error per output unit.
    fn train(&mut self, input: &[f64], target: &[f64]) -> Result<Matrix>;

    fn to_bytes(&self) -> Vec<u8>;

    fn write_to_file(&self, path: &std::path::Path) -> Result<()> {
        std::fs::write(path, self.to_bytes())?;
        Ok(())
    }
}

impl Model for Network {
    fn input_size(&self) -> usize {
        Network::input_size(self)
    }

    fn output_size(&self) -> usize {
        Network::output_size(self)
    }

    fn feed(&self, input: &[f64]) -> Result<Vec<f64>> {
        Network::feed(self, input)
    }

    fn train(&mut self, input: &[f64], target: &[f64]) -> Result<Matrix> {
        Network::train(self, input, target)
    }

    fn to_bytes(&self) -> Vec<u8> {
        Network::to_bytes(self)
    }
}
