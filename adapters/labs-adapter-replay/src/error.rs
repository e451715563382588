//! Error types for the replay adapter.

use labs_core::SamplerError;
use thiserror::Error;

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// Errors that can occur when loading or replaying an archive.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Reading the archive failed.
    #[error("Failed to read archive {path}: {message}")]
    Io {
        /// Archive path.
        path: String,
        /// Underlying error.
        message: String,
    },

    /// The archive is not valid JSON or has the wrong layout.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A recorded outcome is not a `0`/`1` string.
    #[error("Invalid bitstring {bitstring:?} at gamma={gamma}, beta={beta}")]
    InvalidBitstring {
        /// The offending key.
        bitstring: String,
        /// Cost parameter of the record.
        gamma: f64,
        /// Mixer parameter of the record.
        beta: f64,
    },

    /// A recorded outcome has the wrong length.
    #[error("Bitstring {bitstring:?} has length {got}, archive N is {expected}")]
    LengthMismatch {
        /// The offending key.
        bitstring: String,
        /// Archive problem size.
        expected: usize,
        /// Length of the key.
        got: usize,
    },

    /// A record has no counts to draw from.
    #[error("Record at gamma={gamma}, beta={beta} has no counts")]
    EmptyRecord {
        /// Cost parameter of the record.
        gamma: f64,
        /// Mixer parameter of the record.
        beta: f64,
    },

    /// A record has a non-finite parameter.
    #[error("Record has non-finite parameters gamma={gamma}, beta={beta}")]
    InvalidPoint {
        /// Cost parameter of the record.
        gamma: f64,
        /// Mixer parameter of the record.
        beta: f64,
    },

    /// No record matches the requested point.
    #[error("No recorded counts for gamma={gamma}, beta={beta}")]
    PointNotFound {
        /// Requested cost parameter.
        gamma: f64,
        /// Requested mixer parameter.
        beta: f64,
    },
}

impl From<ReplayError> for SamplerError {
    fn from(e: ReplayError) -> Self {
        SamplerError::Backend(e.to_string())
    }
}
