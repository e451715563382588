//! LABS energy functional.
//!
//! For spins `s_i = 2 b_i - 1` the aperiodic autocorrelation at lag `k` is
//!
//!   C_k = Σ_{i=0}^{N-k-1} s_i · s_{i+k}
//!
//! and the energy is `E = Σ_{k=1}^{N-1} C_k²`. No normalization or centering
//! is applied. Sequences shorter than two bits have energy 0.

use crate::bits::BitSequence;

/// LABS energy: non-negative sum of squared sidelobe autocorrelations.
pub type Energy = u64;

/// Signed autocorrelation `C_k` of the spin sequence.
///
/// Lags outside `1..N` yield 0.
pub fn autocorrelation(bits: &BitSequence, k: usize) -> i64 {
    let n = bits.len();
    if k == 0 || k >= n {
        return 0;
    }
    let spins: Vec<i64> = bits.spins().collect();
    lag_sum(&spins, k)
}

/// Compute the LABS energy of a bit sequence.
pub fn energy(bits: &BitSequence) -> Energy {
    let spins: Vec<i64> = bits.spins().collect();
    (1..spins.len())
        .map(|k| {
            let c = lag_sum(&spins, k);
            (c * c) as Energy
        })
        .sum()
}

/// Energy of the all-equal sequence of length `n`: `Σ_{k=1}^{n-1} (n-k)²`.
///
/// This is the largest energy any sequence of length `n` can reach.
pub fn max_energy(n: usize) -> Energy {
    (1..n).map(|k| ((n - k) * (n - k)) as Energy).sum()
}

fn lag_sum(spins: &[i64], k: usize) -> i64 {
    spins
        .iter()
        .zip(&spins[k..])
        .map(|(a, b)| a * b)
        .sum()
}
