//! Recorded measurement counts.
//!
//! An archive holds, for one problem size, the counts histogram measured at
//! each `(gamma, beta)` point:
//!
//! ```json
//! {
//!   "n": 4,
//!   "records": [
//!     { "gamma": 0.1, "beta": 0.2, "counts": { "0110": 12, "1001": 4 } }
//!   ]
//! }
//! ```
//!
//! Bitstring keys are read qubit 0 first.

use std::collections::BTreeMap;
use std::path::Path;

use labs_core::BitSequence;
use serde::{Deserialize, Serialize};

use crate::error::{ReplayError, ReplayResult};

/// Counts histogram, keyed by bitstring.
pub type Counts = BTreeMap<String, u64>;

/// Counts measured at one parameter point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotRecord {
    /// Cost parameter.
    pub gamma: f64,
    /// Mixer parameter.
    pub beta: f64,
    /// Outcome histogram.
    pub counts: Counts,
}

impl ShotRecord {
    /// Total number of recorded shots.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// All records for one problem size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotArchive {
    /// Problem size N.
    pub n: usize,
    /// One record per parameter point.
    #[serde(default)]
    pub records: Vec<ShotRecord>,
}

impl ShotArchive {
    /// Create an empty archive for size `n`.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            records: Vec::new(),
        }
    }

    /// Add a record.
    #[must_use]
    pub fn with_record(mut self, gamma: f64, beta: f64, counts: Counts) -> Self {
        self.records.push(ShotRecord {
            gamma,
            beta,
            counts,
        });
        self
    }

    /// Parse and validate an archive from JSON.
    pub fn from_json(source: &str) -> ReplayResult<Self> {
        let archive: Self = serde_json::from_str(source)?;
        archive.validate()?;
        Ok(archive)
    }

    /// Load and validate an archive file.
    pub fn from_file(path: &Path) -> ReplayResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| ReplayError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&source)
    }

    /// Write the archive as pretty JSON.
    pub fn to_file(&self, path: &Path) -> ReplayResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| ReplayError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Check every record against the archive size.
    ///
    /// Records must have finite parameters, at least one shot, and only
    /// `0`/`1` keys of length `n`.
    pub fn validate(&self) -> ReplayResult<()> {
        for record in &self.records {
            self.parse_record(record)?;
        }
        Ok(())
    }

    /// Parse a record's keys into sequences with their counts.
    ///
    /// Zero-count entries are dropped.
    pub(crate) fn parse_record(
        &self,
        record: &ShotRecord,
    ) -> ReplayResult<Vec<(BitSequence, u64)>> {
        let (gamma, beta) = (record.gamma, record.beta);
        if !gamma.is_finite() || !beta.is_finite() {
            return Err(ReplayError::InvalidPoint { gamma, beta });
        }

        let mut outcomes = Vec::with_capacity(record.counts.len());
        for (key, &count) in &record.counts {
            let bits: BitSequence = key.parse().map_err(|_| ReplayError::InvalidBitstring {
                bitstring: key.clone(),
                gamma,
                beta,
            })?;
            if bits.len() != self.n {
                return Err(ReplayError::LengthMismatch {
                    bitstring: key.clone(),
                    expected: self.n,
                    got: bits.len(),
                });
            }
            if count > 0 {
                outcomes.push((bits, count));
            }
        }

        if outcomes.is_empty() {
            return Err(ReplayError::EmptyRecord { gamma, beta });
        }
        Ok(outcomes)
    }
}
