use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{NetError, Result};
use crate::network::network::{Network, DEFAULT_LEARNING_RATE};

/// A serializable description of a network's shape and hyperparameters.
///
/// Fields:
/// - `name`         : human-readable name, used for default output files
/// - `input_size`   : length of every input vector
/// - `hidden_sizes` : hidden layer widths, input side first; may be empty
/// - `output_size`  : length of every output vector
/// - `activation`   : `"sigmoid"`, `"tanh"` or `"identity"`
/// - `learning_rate`: fixed gradient-descent step
/// - `seed`         : seeds weight initialization when set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub name: String,
    pub input_size: usize,
    #[serde(default)]
    pub hidden_sizes: Vec<usize>,
    pub output_size: usize,
    #[serde(default = "default_activation")]
    pub activation: String,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_activation() -> String {
    ActivationFunction::SIGMOID.name().to_string()
}

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

impl NetworkSpec {
    pub fn new(name: &str, input_size: usize, hidden_sizes: &[usize], output_size: usize) -> Self {
        NetworkSpec {
            name: name.to_string(),
            input_size,
            hidden_sizes: hidden_sizes.to_vec(),
            output_size,
            activation: default_activation(),
            learning_rate: DEFAULT_LEARNING_RATE,
            seed: None,
        }
    }

    /// Checks everything `build` would otherwise trip over.
    pub fn validate(&self) -> Result<()> {
        ActivationFunction::by_name(&self.activation)?;
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NetError::Config(format!(
                "learning_rate must be a positive number, got {}",
                self.learning_rate
            )));
        }
        if self.input_size == 0 || self.output_size == 0 || self.hidden_sizes.contains(&0) {
            return Err(NetError::Config(format!(
                "layer sizes must be at least 1 (input {}, hidden {:?}, output {})",
                self.input_size, self.hidden_sizes, self.output_size
            )));
        }
        Ok(())
    }

    /// Builds a freshly initialized network. Uses `rng` for the weights; a
    /// configured `seed` is the caller's business (see the CLI).
    pub fn build<R>(&self, rng: &mut R) -> Result<Network>
    where
        R: Rng + ?Sized,
    {
        self.validate()?;
        let mut network = Network::new(self.input_size, &self.hidden_sizes, self.output_size, rng)?;
        network.set_activation(ActivationFunction::by_name(&self.activation)?);
        network.set_learning_rate(self.learning_rate);
        Ok(network)
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let spec: NetworkSpec = serde_json::from_reader(reader)?;
        spec.validate()?;
        Ok(spec)
    }
}
