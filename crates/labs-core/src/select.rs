//! Best-of selection over a sample multiset.

use serde::{Deserialize, Serialize};

use crate::bits::BitSequence;
use crate::energy::{Energy, energy};

/// The lowest-energy sequence of a sample set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestSample {
    /// The winning sequence.
    pub bits: BitSequence,
    /// Its LABS energy.
    pub energy: Energy,
}

/// Return the sequence with strictly minimal energy.
///
/// Ties keep the first sequence encountered. An empty sample set yields
/// `None`, which is a valid outcome rather than an error.
pub fn select_best<'a, I>(samples: I) -> Option<BestSample>
where
    I: IntoIterator<Item = &'a BitSequence>,
{
    let mut best: Option<(&BitSequence, Energy)> = None;
    for bits in samples {
        let e = energy(bits);
        if best.is_none_or(|(_, best_e)| e < best_e) {
            best = Some((bits, e));
        }
    }
    best.map(|(bits, energy)| BestSample {
        bits: bits.clone(),
        energy,
    })
}
