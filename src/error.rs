use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NetError>;

/// Every failure the library can report. Nothing is recovered internally;
/// errors always go back to the immediate caller.
#[derive(Debug, Error)]
pub enum NetError {
    /// A matrix operation was given operands whose shapes do not fit.
    #[error("dimension mismatch in {op}: {left:?} vs {right:?}")]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// A matrix had the wrong shape for a conversion (e.g. to a vector).
    #[error("invalid shape {rows}x{cols}: expected a single column")]
    InvalidShape { rows: usize, cols: usize },

    #[error("empty input: at least one value is required")]
    EmptyInput,

    #[error("input size mismatch: expected {expected} values, got {actual}")]
    InputSizeMismatch { expected: usize, actual: usize },

    #[error("target size mismatch: expected {expected} values, got {actual}")]
    TargetSizeMismatch { expected: usize, actual: usize },

    /// Weights or configuration disagree with each other.
    #[error("config mismatch: {0}")]
    ConfigMismatch(String),

    #[error("unknown activation '{0}'")]
    UnknownActivation(String),

    #[error("model file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Persisted bytes could not be turned back into a model.
    #[error("decode error: {0}")]
    Decode(String),

    #[error("encode error: {0}")]
    Encode(String),
}

impl NetError {
    pub(crate) fn dims(op: &'static str, left: (usize, usize), right: (usize, usize)) -> NetError {
        NetError::DimensionMismatch { op, left, right }
    }
}
