//! Coupling terms of the LABS cost function.
//!
//! Expanding `E = Σ_k (Σ_i s_i s_{i+k})²` produces, apart from constants,
//! two-body products `s_i s_{i+2k}` and four-body products
//! `s_i s_{i+t} s_{i+k} s_{i+k+t}`. The index tuples enumerated here are the
//! terms a depth-1 QAOA cost layer applies rotations for:
//!
//! ```text
//! pairs:  (i, i+2k)              i in 0..N-2, k in 1..=(N-1-i)/2
//! quads:  (i, i+t, i+k, i+k+t)   i in 0..N-3, t in 1..=(N-2-i)/2, k in t+1..N-i-t
//! ```
//!
//! Emission order is fixed; downstream rotation order relies on it.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LabsError, LabsResult};

/// Two-body coupling `(i, j)` with `i < j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CouplingPair(pub [usize; 2]);

/// Four-body coupling `(a, b, c, d)` with `a < b < c < d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CouplingQuad(pub [usize; 4]);

impl CouplingPair {
    /// Indices of the pair.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl CouplingQuad {
    /// Indices of the quad.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

/// The pair and quad coupling lists for one problem size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interactions {
    /// Two-body terms.
    pub pairs: Vec<CouplingPair>,
    /// Four-body terms.
    pub quads: Vec<CouplingQuad>,
}

impl Interactions {
    /// Enumerate all coupling terms for a sequence of length `n`.
    ///
    /// `n < 3` has no pairs and `n < 4` has no quads.
    pub fn enumerate(n: usize) -> Self {
        let interactions = Self {
            pairs: enumerate_pairs(n),
            quads: enumerate_quads(n),
        };
        debug!(
            n,
            pairs = interactions.pairs.len(),
            quads = interactions.quads.len(),
            "enumerated LABS interactions"
        );
        interactions
    }

    /// Wrap caller-supplied coupling lists.
    pub fn from_parts(pairs: Vec<CouplingPair>, quads: Vec<CouplingQuad>) -> Self {
        Self { pairs, quads }
    }

    /// Number of two-body terms.
    pub fn num_pairs(&self) -> usize {
        self.pairs.len()
    }

    /// Number of four-body terms.
    pub fn num_quads(&self) -> usize {
        self.quads.len()
    }

    /// Check that every tuple is strictly ascending and lies within `[0, n)`.
    pub fn validate(&self, n: usize) -> LabsResult<()> {
        let tuples = self
            .pairs
            .iter()
            .map(CouplingPair::indices)
            .chain(self.quads.iter().map(CouplingQuad::indices));
        for tuple in tuples {
            let ascending = tuple.windows(2).all(|w| w[0] < w[1]);
            let in_range = tuple.iter().all(|&i| i < n);
            if !ascending || !in_range {
                return Err(LabsError::InvalidInteraction {
                    tuple: tuple.to_vec(),
                    n,
                });
            }
        }
        Ok(())
    }
}

fn enumerate_pairs(n: usize) -> Vec<CouplingPair> {
    let mut pairs = Vec::new();
    for i in 0..n.saturating_sub(2) {
        let max_k = (n - 1 - i) / 2;
        for k in 1..=max_k {
            pairs.push(CouplingPair([i, i + 2 * k]));
        }
    }
    pairs
}

fn enumerate_quads(n: usize) -> Vec<CouplingQuad> {
    let mut quads = Vec::new();
    for i in 0..n.saturating_sub(3) {
        let max_t = (n - 2 - i) / 2;
        for t in 1..=max_t {
            for k in (t + 1)..(n - i - t) {
                quads.push(CouplingQuad([i, i + t, i + k, i + k + t]));
            }
        }
    }
    quads
}

/// Memoized enumerations keyed by problem size.
///
/// Enumeration depends only on N, so a search that is run repeatedly for the
/// same N can share one set of lists.
#[derive(Debug, Default)]
pub struct InteractionCache {
    entries: FxHashMap<usize, Arc<Interactions>>,
}

impl InteractionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interactions for `n`, enumerating them on first use.
    pub fn get(&mut self, n: usize) -> Arc<Interactions> {
        Arc::clone(
            self.entries
                .entry(n)
                .or_insert_with(|| Arc::new(Interactions::enumerate(n))),
        )
    }

    /// Number of cached problem sizes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
