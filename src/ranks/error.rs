//! Error types for dataset loading and iteration transitions.

use thiserror::Error;

/// Result type for core visualizer operations.
pub type Result<T> = std::result::Result<T, VisError>;

/// Errors raised by the dataset model and the transition controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VisError {
    /// Structural validation failed while loading a dataset.
    #[error("malformed dataset: {0}")]
    MalformedDataset(String),

    /// The requested iteration has no recorded snapshot.
    #[error("iteration {0} is not present in the dataset")]
    UnknownIteration(u64),

    /// A snapshot disagrees with the node count fixed for the session.
    #[error("snapshot for iteration {iteration} has {actual} ranks, expected {expected}")]
    SizeMismatch {
        iteration: u64,
        expected: usize,
        actual: usize,
    },
}

impl VisError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedDataset(reason.into())
    }
}
