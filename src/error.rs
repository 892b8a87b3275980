/// Result type used throughout the engine.
pub type Result<T> = std::result::Result<T, NetError>;

/// Every failure the engine can report.
///
/// All of these are fail-fast: the operation that detects one returns before
/// touching any matrix buffer or network slot.
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    /// A matrix or layer was given a dimension smaller than 1.
    #[error("invalid shape {rows}x{columns}: both dimensions must be at least 1")]
    InvalidShape { rows: usize, columns: usize },

    /// Operand shapes are incompatible for `op`.
    #[error("shape mismatch in {op}: {}x{} vs {}x{}", left.0, left.1, right.0, right.1)]
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// A serialized buffer is shorter than its header/payload claims, or the
    /// header itself is nonsensical.
    #[error("malformed data: {0}")]
    MalformedData(String),

    /// A destination buffer cannot hold the value being serialized into it.
    #[error("buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// A training/test data file could not be parsed.
    #[error("dataset error: {0}")]
    Dataset(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}
