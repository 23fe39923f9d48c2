//! Crate-wide error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A vector or weight blob does not fit the network's layer sizes.
    #[error("topology mismatch: {what} has length {actual}, expected {expected}")]
    TopologyMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("training set is empty")]
    EmptyTrainingSet,

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        Error::TopologyMismatch {
            what,
            expected,
            actual,
        }
    }
}
