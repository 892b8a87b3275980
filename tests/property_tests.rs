//! Property-based tests for matrices and networks

use deepnet::{Matrix, NetError, Network};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const MAX_DIM: usize = 6;

/// Strategy for a matrix with arbitrary shape and bounded entries
fn matrix_strategy() -> impl Strategy<Value = Matrix> {
    (1..=MAX_DIM, 1..=MAX_DIM).prop_flat_map(|(rows, columns)| {
        prop::collection::vec(-1e6f64..1e6, rows * columns)
            .prop_map(move |data| Matrix::from_vec(rows, columns, data).unwrap())
    })
}

/// Two matrices of one shape with small integral entries, so sums are exact
fn integral_pair() -> impl Strategy<Value = (Matrix, Matrix)> {
    (1..=MAX_DIM, 1..=MAX_DIM).prop_flat_map(|(rows, columns)| {
        let cell = (-1000i32..1000).prop_map(f64::from);
        (
            prop::collection::vec(cell.clone(), rows * columns),
            prop::collection::vec(cell, rows * columns),
        )
            .prop_map(move |(a, b)| {
                (
                    Matrix::from_vec(rows, columns, a).unwrap(),
                    Matrix::from_vec(rows, columns, b).unwrap(),
                )
            })
    })
}

/// Layer sizes plus a seed for building a network
fn topology_strategy() -> impl Strategy<Value = (usize, Vec<usize>, usize, u64)> {
    (
        1..=MAX_DIM,
        prop::collection::vec(1..=MAX_DIM, 0..3),
        1..=MAX_DIM,
        any::<u64>(),
    )
}

proptest! {
    #[test]
    fn transpose_is_an_involution(m in matrix_strategy()) {
        let t = m.transpose();
        prop_assert_eq!(t.shape(), (m.columns(), m.rows()));
        prop_assert_eq!(t.transpose(), m);
    }

    #[test]
    fn subtract_undoes_add((a, b) in integral_pair()) {
        let sum = a.add(&b).unwrap();
        prop_assert_eq!(sum.subtract(&b).unwrap(), a.clone());
        prop_assert_eq!(sum, b.add(&a).unwrap());
    }

    #[test]
    fn matrix_bytes_round_trip(m in matrix_strategy()) {
        let bytes = m.to_bytes();
        prop_assert_eq!(bytes.len(), m.byte_len());
        prop_assert_eq!(bytes.len(), 8 + 8 * m.len());
        prop_assert_eq!(Matrix::from_bytes(&bytes).unwrap(), m);
    }

    #[test]
    fn construction_needs_positive_dimensions(rows in 0usize..4, columns in 0usize..4) {
        let built = Matrix::new(rows, columns);
        if rows >= 1 && columns >= 1 {
            let m = built.unwrap();
            prop_assert_eq!(m.shape(), (rows, columns));
            prop_assert!(m.as_slice().iter().all(|&v| v == 0.0));
        } else {
            let is_invalid = matches!(built, Err(NetError::InvalidShape { .. }));
            prop_assert!(is_invalid);
        }
    }

    #[test]
    fn short_buffers_are_malformed(bytes in prop::collection::vec(any::<u8>(), 0..8)) {
        let matrix = matches!(Matrix::from_bytes(&bytes), Err(NetError::MalformedData(_)));
        let network = matches!(Network::from_bytes(&bytes), Err(NetError::MalformedData(_)));
        prop_assert!(matrix);
        prop_assert!(network);
    }

    #[test]
    fn network_bytes_round_trip((input, hidden, output, seed) in topology_strategy()) {
        let net = Network::new(input, &hidden, output, &mut StdRng::seed_from_u64(seed)).unwrap();
        let bytes = net.to_bytes();
        prop_assert_eq!(bytes.len(), net.byte_len());

        let loaded = Network::from_bytes(&bytes).unwrap();
        prop_assert_eq!(loaded.input_size(), input);
        prop_assert_eq!(loaded.output_size(), output);
        prop_assert_eq!(loaded.hidden_sizes(), hidden.as_slice());
        prop_assert_eq!(loaded.weights(), net.weights());
        prop_assert_eq!(loaded.biases(), net.biases());
        prop_assert_eq!(loaded.to_bytes(), bytes);
    }

    #[test]
    fn feed_is_pure_and_bounded(
        (input, hidden, output, seed) in topology_strategy(),
        values in prop::collection::vec(0.0f64..1.0, MAX_DIM),
    ) {
        let net = Network::new(input, &hidden, output, &mut StdRng::seed_from_u64(seed)).unwrap();
        let before = net.to_bytes();

        let first = net.feed(&values[..input]).unwrap();
        let second = net.feed(&values[..input]).unwrap();

        prop_assert_eq!(first.len(), output);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.iter().all(|&v| v > 0.0 && v < 1.0));
        prop_assert_eq!(net.to_bytes(), before);
    }
}
