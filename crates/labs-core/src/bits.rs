//! Binary sequences and their spin representation.
//!
//! A [`BitSequence`] holds N values in {0, 1}. Bit `i` maps to the spin
//! `2 * bit - 1`, so `0 → -1` and `1 → +1`.
//!
//! The textual form is a string of `0`/`1` characters where character `i`
//! is bit `i` (qubit 0 first), matching the order in which samplers report
//! measurement outcomes.
//!
//! ```rust
//! use labs_core::bits::BitSequence;
//!
//! let bits: BitSequence = "0110".parse().unwrap();
//! assert_eq!(bits.spins().collect::<Vec<_>>(), vec![-1, 1, 1, -1]);
//! assert_eq!(bits.reversed().to_string(), "0110");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{LabsError, LabsResult};

/// An immutable sequence of bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct BitSequence {
    bits: Vec<u8>,
}

impl BitSequence {
    /// Build a sequence from raw bit values.
    ///
    /// Every value must be 0 or 1.
    pub fn new(bits: Vec<u8>) -> LabsResult<Self> {
        if let Some(pos) = bits.iter().position(|&b| b > 1) {
            return Err(LabsError::Parse(format!(
                "value {} at position {pos} is not a bit",
                bits[pos]
            )));
        }
        Ok(Self { bits })
    }

    /// Build a sequence from booleans (`true` is 1).
    pub fn from_bools(bits: impl IntoIterator<Item = bool>) -> Self {
        Self {
            bits: bits.into_iter().map(u8::from).collect(),
        }
    }

    /// All-zero sequence of length `n`.
    pub fn zeros(n: usize) -> Self {
        Self { bits: vec![0; n] }
    }

    /// All-one sequence of length `n`.
    pub fn ones(n: usize) -> Self {
        Self { bits: vec![1; n] }
    }

    /// Sequence length N.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True for the empty sequence.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Raw bit values.
    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    /// Spin values `2 * bit - 1`.
    pub fn spins(&self) -> impl Iterator<Item = i64> + '_ {
        self.bits.iter().map(|&b| 2 * i64::from(b) - 1)
    }

    /// The same sequence read end to end.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            bits: self.bits.iter().rev().copied().collect(),
        }
    }
}

/// Reverse a sequence end to end.
///
/// Reversal leaves the LABS energy unchanged.
pub fn reverse_bits(bits: &BitSequence) -> BitSequence {
    bits.reversed()
}

impl FromStr for BitSequence {
    type Err = LabsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .trim()
            .chars()
            .enumerate()
            .map(|(i, c)| match c {
                '0' => Ok(0),
                '1' => Ok(1),
                other => Err(LabsError::Parse(format!(
                    "unexpected character '{other}' at position {i} in \"{s}\""
                ))),
            })
            .collect::<LabsResult<Vec<u8>>>()?;
        Ok(Self { bits })
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.bits {
            write!(f, "{b}")?;
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for BitSequence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = Vec::<u8>::deserialize(deserializer)?;
        Self::new(bits).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<Vec<u8>> for BitSequence {
    type Error = LabsError;

    fn try_from(bits: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

impl AsRef<[u8]> for BitSequence {
    fn as_ref(&self) -> &[u8] {
        &self.bits
    }
}
