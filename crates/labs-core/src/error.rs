//! Error types for the core crate.

use thiserror::Error;

use crate::sampler::SamplerError;

/// Errors that can occur while configuring or running a search.
///
/// Empty sample sets and empty search spaces are not errors: they surface as
/// `None` from [`select_best`](crate::select::select_best) and as a
/// [`SearchResult`](crate::search::SearchResult) without a best sequence.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LabsError {
    /// The sampler failed. The scan is aborted and partial results dropped.
    #[error(transparent)]
    Sampler(#[from] SamplerError),

    /// A bitstring could not be parsed.
    #[error("Invalid bitstring: {0}")]
    Parse(String),

    /// Search configuration is inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A caller-supplied coupling tuple does not fit the problem size.
    #[error("Invalid interaction {tuple:?} for N = {n}")]
    InvalidInteraction {
        /// The offending index tuple.
        tuple: Vec<usize>,
        /// Problem size the tuple was checked against.
        n: usize,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization error.
    #[error("Export error: {0}")]
    Export(String),
}

impl From<serde_json::Error> for LabsError {
    fn from(e: serde_json::Error) -> Self {
        LabsError::Export(e.to_string())
    }
}

impl From<serde_yaml_ng::Error> for LabsError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        LabsError::InvalidConfig(e.to_string())
    }
}

/// Result type for core operations.
pub type LabsResult<T> = Result<T, LabsError>;
