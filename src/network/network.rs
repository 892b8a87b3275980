use std::path::Path;

use bytes::{Buf, BufMut};
use rand::Rng;
use tracing::{debug, warn};

use crate::activation::activation::ActivationFunction;
use crate::error::{NetError, Result};
use crate::math::matrix::Matrix;

/// Learning rate a freshly built or loaded network starts with.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

const I32_BYTES: usize = std::mem::size_of::<i32>();

/// A fully connected feed-forward network.
///
/// Layer `i` maps `a_i` to `a_{i+1} = f(W_i * a_i + b_i)`, where `W_i` is
/// `layer_out x layer_in` and `b_i` is a `layer_out x 1` column. With no
/// hidden layers the network is a single layer from input to output.
///
/// Layer sizes never change after construction; training only replaces the
/// contents of the weight and bias slots.
#[derive(Debug, Clone)]
pub struct Network {
    input_size: usize,
    output_size: usize,
    hidden_sizes: Vec<usize>,
    weights: Vec<Matrix>,
    biases: Vec<Matrix>,
    activation: ActivationFunction,
    learning_rate: f64,
}

impl Network {
    /// Builds a network with every weight and bias drawn uniformly from
    /// `[-1, 1)` using `rng`.
    pub fn new<R>(input_size: usize, hidden_sizes: &[usize], output_size: usize, rng: &mut R) -> Result<Network>
    where
        R: Rng + ?Sized,
    {
        let sizes = layer_sizes(input_size, hidden_sizes, output_size)?;

        let mut weights = Vec::with_capacity(sizes.len() - 1);
        let mut biases = Vec::with_capacity(sizes.len() - 1);
        for pair in sizes.windows(2) {
            let (fan_in, fan_out) = (pair[0], pair[1]);
            weights.push(Matrix::random_uniform(fan_out, fan_in, -1.0, 1.0, rng)?);
            biases.push(Matrix::random_uniform(fan_out, 1, -1.0, 1.0, rng)?);
        }

        debug!(input_size, output_size, ?hidden_sizes, "built network");

        Ok(Network {
            input_size,
            output_size,
            hidden_sizes: hidden_sizes.to_vec(),
            weights,
            biases,
            activation: ActivationFunction::SIGMOID,
            learning_rate: DEFAULT_LEARNING_RATE,
        })
    }

    /// Builds a network from explicit per-layer matrices.
    ///
    /// `weights[i]` must be `out_i x in_i` with `in_0` the input size and
    /// `in_i == out_{i-1}`; `biases[i]` must be `out_i x 1`.
    pub fn from_parts(weights: Vec<Matrix>, biases: Vec<Matrix>) -> Result<Network> {
        if weights.is_empty() {
            return Err(NetError::InvalidShape { rows: 0, columns: 0 });
        }
        if weights.len() != biases.len() {
            return Err(NetError::ShapeMismatch {
                op: "from_parts",
                left: (weights.len(), 1),
                right: (biases.len(), 1),
            });
        }

        for (i, (w, b)) in weights.iter().zip(&biases).enumerate() {
            if b.shape() != (w.rows(), 1) {
                return Err(NetError::ShapeMismatch {
                    op: "from_parts bias",
                    left: (w.rows(), 1),
                    right: b.shape(),
                });
            }
            if i > 0 && w.columns() != weights[i - 1].rows() {
                return Err(NetError::ShapeMismatch {
                    op: "from_parts weight",
                    left: weights[i - 1].shape(),
                    right: w.shape(),
                });
            }
        }

        let input_size = weights[0].columns();
        let output_size = weights[weights.len() - 1].rows();
        let hidden_sizes = weights[..weights.len() - 1].iter().map(Matrix::rows).collect();

        Ok(Network {
            input_size,
            output_size,
            hidden_sizes,
            weights,
            biases,
            activation: ActivationFunction::SIGMOID,
            learning_rate: DEFAULT_LEARNING_RATE,
        })
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn hidden_sizes(&self) -> &[usize] {
        &self.hidden_sizes
    }

    /// Number of weight/bias pairs (hidden layers + 1).
    pub fn layer_count(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    pub fn biases(&self) -> &[Matrix] {
        &self.biases
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    pub fn set_activation(&mut self, activation: ActivationFunction) {
        self.activation = activation;
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }

    /// Forward pass. Does not touch the network.
    pub fn feed(&self, input: &[f64]) -> Result<Vec<f64>> {
        check_len("feed", self.input_size, input.len())?;

        let f = self.activation;
        let mut activation = Matrix::as_column(input)?;
        for (w, b) in self.weights.iter().zip(&self.biases) {
            activation = w.multiply(&activation)?.add(b)?.map(|x| f.apply(x));
        }

        activation.to_column_vec()
    }

    /// Runs the layer stack backwards: `a_i = f(W_i^T * (a_{i+1} - b_i))`.
    ///
    /// This applies the forward activation at every step, not its inverse,
    /// so the result is a rough reconstruction of an input that would
    /// produce `output`, not a functional inverse.
    pub fn inverse(&self, output: &[f64]) -> Result<Vec<f64>> {
        check_len("inverse", self.output_size, output.len())?;

        let f = self.activation;
        let mut activation = Matrix::as_column(output)?;
        for (w, b) in self.weights.iter().zip(&self.biases).rev() {
            activation = w.transpose().multiply(&activation.subtract(b)?)?.map(|x| f.apply(x));
        }

        activation.to_column_vec()
    }

    /// One step of gradient descent on the summed squared error for a single
    /// `(input, target)` pair.
    ///
    /// Returns `(output - target)^2` per output unit, measured before the
    /// update. The error passed down to layer `i - 1` is computed with the
    /// already-updated `W_i`. Nothing is written back to the network unless
    /// every layer's update succeeds.
    pub fn train(&mut self, input: &[f64], target: &[f64]) -> Result<Matrix> {
        check_len("train input", self.input_size, input.len())?;
        check_len("train target", self.output_size, target.len())?;

        let f = self.activation;
        let layers = self.weights.len();

        // sums[i] is the pre-activation of layer i's output, activations[i] its input.
        let mut activations = Vec::with_capacity(layers + 1);
        let mut sums = Vec::with_capacity(layers);
        activations.push(Matrix::as_column(input)?);
        for i in 0..layers {
            let z = self.weights[i].multiply(&activations[i])?.add(&self.biases[i])?;
            activations.push(z.map(|x| f.apply(x)));
            sums.push(z);
        }

        let expected = Matrix::as_column(target)?;
        let output_error = activations[layers].subtract(&expected)?;
        let mut error = output_error.scale(2.0);

        let lr = self.learning_rate;
        let mut updated = Vec::with_capacity(layers);
        for i in (0..layers).rev() {
            let delta_bias = sums[i].map(|x| f.derivative(x)).hadamard(&error)?;
            let delta_weight = delta_bias.multiply(&activations[i].transpose())?;

            let bias = self.biases[i].subtract(&delta_bias.scale(lr))?;
            let weight = self.weights[i].subtract(&delta_weight.scale(lr))?;

            if i > 0 {
                error = weight.transpose().multiply(&error)?;
            }
            updated.push((weight, bias));
        }

        for (i, (weight, bias)) in updated.into_iter().rev().enumerate() {
            self.weights[i] = weight;
            self.biases[i] = bias;
        }

        Ok(output_error.map(|x| x * x))
    }

    // ── Serialization ─────────────────────────────────────────────────────

    /// Exact number of bytes [`Network::to_bytes`] produces.
    pub fn byte_len(&self) -> usize {
        let header = (3 + self.hidden_sizes.len()) * I32_BYTES;
        let matrices: usize = self.weights.iter().chain(&self.biases).map(Matrix::byte_len).sum();
        header + matrices
    }

    /// Big-endian `input_size, output_size, hidden_count, hidden_sizes...`
    /// followed by every weight matrix, then every bias matrix, in layer order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        self.write_to(&mut out);
        out
    }

    pub fn write_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_i32(self.input_size as i32);
        buf.put_i32(self.output_size as i32);
        buf.put_i32(self.hidden_sizes.len() as i32);
        for &size in &self.hidden_sizes {
            buf.put_i32(size as i32);
        }
        for weight in &self.weights {
            weight.write_to(buf);
        }
        for bias in &self.biases {
            bias.write_to(buf);
        }
    }

    /// Serializes into the front of `dst`, returning the number of bytes written.
    pub fn put_bytes(&self, dst: &mut [u8]) -> Result<usize> {
        let needed = self.byte_len();
        if dst.len() < needed {
            return Err(NetError::BufferTooSmall {
                needed,
                available: dst.len(),
            });
        }
        let mut cursor = &mut dst[..needed];
        self.write_to(&mut cursor);
        Ok(needed)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Network> {
        let mut buf = bytes;
        Network::read_from(&mut buf)
    }

    /// Reads a network from the front of `buf`.
    ///
    /// The layout is positional: matrices are taken as stored. A payload whose
    /// shapes disagree with the header still loads (with a warning), and will
    /// fail with a shape mismatch the first time it is fed.
    pub fn read_from<B: Buf>(buf: &mut B) -> Result<Network> {
        if buf.remaining() < 3 * I32_BYTES {
            return Err(NetError::MalformedData(format!(
                "network header needs {} bytes, {} remain",
                3 * I32_BYTES,
                buf.remaining()
            )));
        }

        let input_size = read_size(buf, "input size")?;
        let output_size = read_size(buf, "output size")?;
        let hidden_count = buf.get_i32();
        if hidden_count < 0 {
            return Err(NetError::MalformedData(format!("negative hidden layer count {}", hidden_count)));
        }
        let hidden_count = hidden_count as usize;

        if buf.remaining() / I32_BYTES < hidden_count {
            return Err(NetError::MalformedData(format!(
                "header declares {} hidden layers, only {} bytes remain",
                hidden_count,
                buf.remaining()
            )));
        }
        let hidden_sizes = (0..hidden_count)
            .map(|_| read_size(buf, "hidden layer size"))
            .collect::<Result<Vec<_>>>()?;

        let sizes = layer_sizes(input_size, &hidden_sizes, output_size)?;
        let layers = sizes.len() - 1;

        let weights = (0..layers).map(|_| Matrix::read_from(buf)).collect::<Result<Vec<_>>>()?;
        let biases = (0..layers).map(|_| Matrix::read_from(buf)).collect::<Result<Vec<_>>>()?;

        for (i, pair) in sizes.windows(2).enumerate() {
            let (fan_in, fan_out) = (pair[0], pair[1]);
            if weights[i].shape() != (fan_out, fan_in) || biases[i].shape() != (fan_out, 1) {
                warn!(
                    layer = i,
                    weight = ?weights[i].shape(),
                    bias = ?biases[i].shape(),
                    expected = ?(fan_out, fan_in),
                    "stored layer shape disagrees with header"
                );
            }
        }

        debug!(input_size, output_size, ?hidden_sizes, "loaded network");

        Ok(Network {
            input_size,
            output_size,
            hidden_sizes,
            weights,
            biases,
            activation: ActivationFunction::SIGMOID,
            learning_rate: DEFAULT_LEARNING_RATE,
        })
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_bytes())?;
        Ok(())
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Network> {
        let bytes = std::fs::read(path)?;
        Network::from_bytes(&bytes)
    }
}

/// Index of the largest value; the first one wins on ties, 0 for an empty slice.
pub fn largest_index(values: &[f64]) -> usize {
    let mut max = 0;
    for (i, &value) in values.iter().enumerate() {
        if value > values[max] {
            max = i;
        }
    }
    max
}

/// `[input, hidden..., output]`, all of which must be at least 1.
fn layer_sizes(input_size: usize, hidden_sizes: &[usize], output_size: usize) -> Result<Vec<usize>> {
    let mut sizes = Vec::with_capacity(hidden_sizes.len() + 2);
    sizes.push(input_size);
    sizes.extend_from_slice(hidden_sizes);
    sizes.push(output_size);

    for pair in sizes.windows(2) {
        if pair[0] < 1 || pair[1] < 1 {
            return Err(NetError::InvalidShape {
                rows: pair[1],
                columns: pair[0],
            });
        }
    }
    Ok(sizes)
}

fn check_len(op: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(NetError::ShapeMismatch {
            op,
            left: (expected, 1),
            right: (found, 1),
        });
    }
    Ok(())
}

fn read_size<B: Buf>(buf: &mut B, what: &str) -> Result<usize> {
    if buf.remaining() < I32_BYTES {
        return Err(NetError::MalformedData(format!("truncated before {}", what)));
    }
    let value = buf.get_i32();
    if value < 1 {
        return Err(NetError::MalformedData(format!("{} must be at least 1, got {}", what, value)));
    }
    Ok(value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    /// 2 inputs, no hidden layers, 1 output, `W = [0.5, -0.5]`, `b = 0`.
    fn half_and_half() -> Network {
        Network::from_parts(vec![m(vec![vec![0.5, -0.5]])], vec![m(vec![vec![0.0]])]).unwrap()
    }

    #[test]
    fn layer_shapes_follow_sizes() {
        let mut rng = StdRng::seed_from_u64(1);
        let net = Network::new(2, &[3, 4, 5], 1, &mut rng).unwrap();

        assert_eq!(net.layer_count(), 4);
        let shapes: Vec<_> = net.weights().iter().map(Matrix::shape).collect();
        assert_eq!(shapes, vec![(3, 2), (4, 3), (5, 4), (1, 5)]);
        let bias_shapes: Vec<_> = net.biases().iter().map(Matrix::shape).collect();
        assert_eq!(bias_shapes, vec![(3, 1), (4, 1), (5, 1), (1, 1)]);

        for w in net.weights().iter().chain(net.biases()) {
            assert!(w.as_slice().iter().all(|&x| (-1.0..1.0).contains(&x)));
        }
    }

    #[test]
    fn no_hidden_layers_is_a_single_layer() {
        let mut rng = StdRng::seed_from_u64(2);
        let net = Network::new(4, &[], 3, &mut rng).unwrap();
        assert_eq!(net.layer_count(), 1);
        assert_eq!(net.weights()[0].shape(), (3, 4));
        assert_eq!(net.feed(&[0.1, 0.2, 0.3, 0.4]).unwrap().len(), 3);
    }

    #[test]
    fn zero_sized_layer_is_rejected() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(Network::new(0, &[2], 1, &mut rng), Err(NetError::InvalidShape { .. })));
        assert!(matches!(Network::new(2, &[0], 1, &mut rng), Err(NetError::InvalidShape { .. })));
        assert!(matches!(Network::new(2, &[2], 0, &mut rng), Err(NetError::InvalidShape { .. })));
    }

    #[test]
    fn same_seed_same_network() {
        let a = Network::new(3, &[4], 2, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = Network::new(3, &[4], 2, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a.weights(), b.weights());
        assert_eq!(a.biases(), b.biases());
    }

    #[test]
    fn from_parts_validates_the_chain() {
        let w0 = Matrix::new(3, 2).unwrap();
        let w1 = Matrix::new(1, 4).unwrap();
        let b0 = Matrix::new(3, 1).unwrap();
        let b1 = Matrix::new(1, 1).unwrap();
        assert!(matches!(
            Network::from_parts(vec![w0.clone(), w1], vec![b0.clone(), b1.clone()]),
            Err(NetError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            Network::from_parts(vec![w0.clone()], vec![b1]),
            Err(NetError::ShapeMismatch { .. })
        ));

        let net = Network::from_parts(vec![w0], vec![b0]).unwrap();
        assert_eq!((net.input_size(), net.output_size()), (2, 3));
        assert!(net.hidden_sizes().is_empty());
    }

    #[test]
    fn feed_known_value() {
        let net = half_and_half();
        assert_eq!(net.feed(&[1.0, 1.0]).unwrap(), vec![0.5]);
    }

    #[test]
    fn feed_is_pure() {
        let mut rng = StdRng::seed_from_u64(4);
        let net = Network::new(3, &[5, 4], 2, &mut rng).unwrap();
        let input = [0.2, 0.9, 0.4];
        assert_eq!(net.feed(&input).unwrap(), net.feed(&input).unwrap());
        assert!(net.feed(&input).unwrap().iter().all(|&y| y > 0.0 && y < 1.0));
    }

    #[test]
    fn wrong_input_length_is_rejected() {
        let mut net = half_and_half();
        assert!(matches!(net.feed(&[1.0]), Err(NetError::ShapeMismatch { op: "feed", .. })));
        assert!(matches!(net.inverse(&[0.1, 0.2]), Err(NetError::ShapeMismatch { op: "inverse", .. })));
        assert!(matches!(
            net.train(&[1.0, 2.0, 3.0], &[1.0]),
            Err(NetError::ShapeMismatch { op: "train input", .. })
        ));
        assert!(matches!(
            net.train(&[1.0, 2.0], &[1.0, 0.0]),
            Err(NetError::ShapeMismatch { op: "train target", .. })
        ));
        assert_eq!(net.weights()[0], m(vec![vec![0.5, -0.5]]));
    }

    #[test]
    fn backprop_uses_updated_weights() {
        // 1 -> 1 -> 1 with identity activation so every step is hand-checkable.
        let mut net = Network::from_parts(
            vec![m(vec![vec![0.5]]), m(vec![vec![2.0]])],
            vec![m(vec![vec![0.0]]), m(vec![vec![0.0]])],
        )
        .unwrap();
        net.set_activation(ActivationFunction::IDENTITY);
        net.set_learning_rate(0.1);

        // a1 = 0.5, a2 = 1.0, error = 2.0
        let squared = net.train(&[1.0], &[0.0]).unwrap();
        assert_eq!(squared.to_column_vec().unwrap(), vec![1.0]);

        // Output layer: delta = 2.0 -> W1 = 2.0 - 0.1 * 1.0, b1 = -0.2
        assert!((net.weights()[1][(0, 0)] - 1.9).abs() < 1e-12);
        assert!((net.biases()[1][(0, 0)] + 0.2).abs() < 1e-12);

        // Error sent down through the updated W1: 1.9 * 2.0 = 3.8
        assert!((net.weights()[0][(0, 0)] - 0.12).abs() < 1e-12);
        assert!((net.biases()[0][(0, 0)] + 0.38).abs() < 1e-12);
    }

    #[test]
    fn training_converges_on_a_fixed_pair() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut net = Network::new(2, &[3], 2, &mut rng).unwrap();
        net.set_learning_rate(0.5);

        let input = [1.0, 0.5];
        let target = [0.2, 0.8];

        let errors: Vec<f64> = (0..2000).map(|_| net.train(&input, &target).unwrap().sum()).collect();

        let head: f64 = errors[..10].iter().sum();
        let tail: f64 = errors[errors.len() - 10..].iter().sum();
        assert!(tail < head);
        assert!(errors[errors.len() - 1] < 1e-6, "final error {}", errors[errors.len() - 1]);
    }

    #[test]
    fn inverse_runs_the_stack_backwards() {
        let mut net = Network::from_parts(vec![m(vec![vec![2.0]])], vec![m(vec![vec![1.0]])]).unwrap();
        net.set_activation(ActivationFunction::IDENTITY);
        assert_eq!(net.inverse(&[5.0]).unwrap(), vec![8.0]);

        let sig = ActivationFunction::SIGMOID;
        let back = half_and_half().inverse(&[0.5]).unwrap();
        assert_eq!(back, vec![sig.apply(0.25), sig.apply(-0.25)]);
    }

    #[test]
    fn byte_layout_puts_all_weights_before_biases() {
        let mut rng = StdRng::seed_from_u64(6);
        let net = Network::new(2, &[3], 1, &mut rng).unwrap();
        let bytes = net.to_bytes();

        assert_eq!(bytes.len(), net.byte_len());
        assert_eq!(&bytes[0..4], &2i32.to_be_bytes());
        assert_eq!(&bytes[4..8], &1i32.to_be_bytes());
        assert_eq!(&bytes[8..12], &1i32.to_be_bytes());
        assert_eq!(&bytes[12..16], &3i32.to_be_bytes());

        let w0_at = 16;
        let w1_at = w0_at + net.weights()[0].byte_len();
        let b0_at = w1_at + net.weights()[1].byte_len();
        let b1_at = b0_at + net.biases()[0].byte_len();
        assert_eq!(Matrix::from_bytes(&bytes[w0_at..]).unwrap(), net.weights()[0]);
        assert_eq!(Matrix::from_bytes(&bytes[w1_at..]).unwrap(), net.weights()[1]);
        assert_eq!(Matrix::from_bytes(&bytes[b0_at..]).unwrap(), net.biases()[0]);
        assert_eq!(Matrix::from_bytes(&bytes[b1_at..]).unwrap(), net.biases()[1]);
        assert_eq!(b1_at + net.biases()[1].byte_len(), bytes.len());
    }

    #[test]
    fn round_trip_is_bit_exact() {
        let mut rng = StdRng::seed_from_u64(7);
        let net = Network::new(4, &[6, 5], 3, &mut rng).unwrap();
        let loaded = Network::from_bytes(&net.to_bytes()).unwrap();

        assert_eq!(loaded.input_size(), 4);
        assert_eq!(loaded.output_size(), 3);
        assert_eq!(loaded.hidden_sizes(), &[6, 5]);
        assert_eq!(loaded.weights(), net.weights());
        assert_eq!(loaded.biases(), net.biases());
        assert_eq!(loaded.to_bytes(), net.to_bytes());
    }

    #[test]
    fn every_truncation_is_malformed() {
        let mut rng = StdRng::seed_from_u64(8);
        let bytes = Network::new(2, &[2], 1, &mut rng).unwrap().to_bytes();
        for len in 0..bytes.len() {
            assert!(
                matches!(Network::from_bytes(&bytes[..len]), Err(NetError::MalformedData(_))),
                "prefix of {} bytes",
                len
            );
        }
    }

    #[test]
    fn negative_hidden_count_is_malformed() {
        let mut bytes = Vec::new();
        for v in [2i32, 1, -1] {
            bytes.extend_from_slice(&v.to_be_bytes());
        }
        assert!(matches!(Network::from_bytes(&bytes), Err(NetError::MalformedData(_))));
    }

    #[test]
    fn incompatible_payload_loads_but_cannot_feed() {
        // Header claims 3 inputs, stored weights take 2.
        let net = half_and_half();
        let mut bytes = net.to_bytes();
        bytes[0..4].copy_from_slice(&3i32.to_be_bytes());

        let loaded = Network::from_bytes(&bytes).unwrap();
        assert_eq!(loaded.input_size(), 3);
        assert!(matches!(loaded.feed(&[1.0, 1.0, 1.0]), Err(NetError::ShapeMismatch { .. })));
    }

    #[test]
    fn put_bytes_checks_destination_size() {
        let net = half_and_half();
        let mut small = vec![0u8; net.byte_len() - 1];
        assert!(matches!(net.put_bytes(&mut small), Err(NetError::BufferTooSmall { .. })));

        let mut exact = vec![0u8; net.byte_len()];
        assert_eq!(net.put_bytes(&mut exact).unwrap(), net.byte_len());
        assert_eq!(exact, net.to_bytes());
    }

    #[test]
    fn file_round_trip() {
        let mut rng = StdRng::seed_from_u64(10);
        let net = Network::new(3, &[2], 2, &mut rng).unwrap();
        let path = std::env::temp_dir().join(format!("deepnet-file-round-trip-{}.dat", std::process::id()));

        net.write_to_file(&path).unwrap();
        let loaded = Network::read_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.weights(), net.weights());
        assert_eq!(loaded.biases(), net.biases());
    }

    #[test]
    fn largest_index_picks_first_maximum() {
        assert_eq!(largest_index(&[0.1, 0.7, 0.3]), 1);
        assert_eq!(largest_index(&[0.5, 0.5]), 0);
        assert_eq!(largest_index(&[]), 0);
    }
}
