//! Sampler contract.
//!
//! A sampler stands in for the depth-1 QAOA circuit and its execution
//! substrate: given the problem size, the coupling terms, `(gamma, beta)`,
//! the cost rotation scale and a shot budget, it returns that many candidate
//! bit sequences. The search never looks inside.
//!
//! # Contract
//!
//! - `sample()` MUST return exactly `request.shots` sequences of length
//!   `request.n`. Zero and one shot MUST be accepted.
//! - Results MAY be stochastic. A sampler that keeps random state SHOULD
//!   honor [`Sampler::reseed`]; the search calls it once with the configured
//!   seed before the first stage.
//! - Failures are reported as [`SamplerError`] and are never retried here.
//!
//! Two samplers ship with the core: [`FixedSampler`], a deterministic stub,
//! and [`UniformSampler`], a classical baseline drawing uniform random bits.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::trace;

use crate::bits::BitSequence;
use crate::interactions::{CouplingPair, CouplingQuad};

/// Errors raised by a sampler.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SamplerError {
    /// The execution substrate failed.
    #[error("Sampler backend error: {0}")]
    Backend(String),

    /// A returned sequence has the wrong length.
    #[error("Sampler returned a sequence of length {got}, expected {expected}")]
    LengthMismatch {
        /// Problem size N.
        expected: usize,
        /// Length actually returned.
        got: usize,
    },

    /// The sampler returned a different number of shots than requested.
    #[error("Sampler returned {got} shots, expected {expected}")]
    ShotMismatch {
        /// Requested shot count.
        expected: usize,
        /// Number of sequences returned.
        got: usize,
    },

    /// The request cannot be served by this sampler.
    #[error("Unsupported request: {0}")]
    Unsupported(String),
}

/// Everything a sampler is given for one call.
#[derive(Debug, Clone, Copy)]
pub struct SampleRequest<'a> {
    /// Problem size N.
    pub n: usize,
    /// Two-body coupling terms.
    pub pairs: &'a [CouplingPair],
    /// Four-body coupling terms.
    pub quads: &'a [CouplingQuad],
    /// Cost rotation parameter.
    pub gamma: f64,
    /// Mixer rotation parameter.
    pub beta: f64,
    /// Scale applied to `gamma` for the cost rotation angle.
    pub cost_scale: f64,
    /// Number of sequences to draw.
    pub shots: usize,
}

impl SampleRequest<'_> {
    /// Rotation angle of the cost layer, `cost_scale * gamma`.
    pub fn cost_angle(&self) -> f64 {
        self.cost_scale * self.gamma
    }

    /// Rotation angle of the mixer layer, `2 * beta`.
    pub fn mixer_angle(&self) -> f64 {
        2.0 * self.beta
    }
}

/// Source of candidate bit sequences for a parameter point.
pub trait Sampler {
    /// Name of this sampler, echoed in search results.
    fn name(&self) -> &str;

    /// Reset any random state from `seed`.
    ///
    /// The default implementation does nothing, for samplers without state.
    fn reseed(&mut self, _seed: u64) {}

    /// Draw `request.shots` sequences.
    fn sample(&mut self, request: &SampleRequest<'_>) -> Result<Vec<BitSequence>, SamplerError>;
}

impl<S: Sampler + ?Sized> Sampler for &mut S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn reseed(&mut self, seed: u64) {
        (**self).reseed(seed);
    }

    fn sample(&mut self, request: &SampleRequest<'_>) -> Result<Vec<BitSequence>, SamplerError> {
        (**self).sample(request)
    }
}

impl<S: Sampler + ?Sized> Sampler for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn reseed(&mut self, seed: u64) {
        (**self).reseed(seed);
    }

    fn sample(&mut self, request: &SampleRequest<'_>) -> Result<Vec<BitSequence>, SamplerError> {
        (**self).sample(request)
    }
}

/// Deterministic stub returning one fixed sequence for every shot.
#[derive(Debug, Clone)]
pub struct FixedSampler {
    bits: BitSequence,
}

impl FixedSampler {
    /// Create a stub that always yields `bits`.
    pub fn new(bits: BitSequence) -> Self {
        Self { bits }
    }

    /// The sequence returned for every shot.
    pub fn bits(&self) -> &BitSequence {
        &self.bits
    }
}

impl Sampler for FixedSampler {
    fn name(&self) -> &str {
        "fixed"
    }

    fn sample(&mut self, request: &SampleRequest<'_>) -> Result<Vec<BitSequence>, SamplerError> {
        if self.bits.len() != request.n {
            return Err(SamplerError::LengthMismatch {
                expected: request.n,
                got: self.bits.len(),
            });
        }
        Ok(vec![self.bits.clone(); request.shots])
    }
}

/// Classical baseline drawing uniformly random sequences.
///
/// Ignores `gamma` and `beta`; useful to measure how much a real sampler
/// improves on random guessing for the same shot budget.
#[derive(Debug, Clone)]
pub struct UniformSampler {
    rng: StdRng,
}

impl UniformSampler {
    /// Create a sampler seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for UniformSampler {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SEED)
    }
}

impl Sampler for UniformSampler {
    fn name(&self) -> &str {
        "uniform"
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn sample(&mut self, request: &SampleRequest<'_>) -> Result<Vec<BitSequence>, SamplerError> {
        trace!(
            n = request.n,
            shots = request.shots,
            "drawing uniform sequences"
        );
        let rng = &mut self.rng;
        Ok((0..request.shots)
            .map(|_| BitSequence::from_bools((0..request.n).map(|_| rng.gen_bool(0.5))))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(n: usize, shots: usize) -> SampleRequest<'static> {
        SampleRequest {
            n,
            pairs: &[],
            quads: &[],
            gamma: 0.3,
            beta: 0.2,
            cost_scale: 2.0,
            shots,
        }
    }

    #[test]
    fn test_angles() {
        let req = request(4, 1);
        assert!((req.cost_angle() - 0.6).abs() < 1e-12);
        assert!((req.mixer_angle() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_fixed_sampler() {
        let bits: BitSequence = "0110".parse().unwrap();
        let mut sampler = FixedSampler::new(bits.clone());

        let out = sampler.sample(&request(4, 3)).unwrap();
        assert_eq!(out, vec![bits.clone(), bits.clone(), bits]);
        assert!(sampler.sample(&request(4, 0)).unwrap().is_empty());
    }

    #[test]
    fn test_fixed_sampler_length_mismatch() {
        let mut sampler = FixedSampler::new("011".parse().unwrap());
        let err = sampler.sample(&request(4, 1)).unwrap_err();
        assert!(matches!(
            err,
            SamplerError::LengthMismatch {
                expected: 4,
                got: 3
            }
        ));
    }

    #[test]
    fn test_uniform_sampler_shape() {
        let mut sampler = UniformSampler::new(7);
        let out = sampler.sample(&request(9, 25)).unwrap();
        assert_eq!(out.len(), 25);
        assert!(out.iter().all(|b| b.len() == 9));
    }

    #[test]
    fn test_uniform_sampler_reseed_is_reproducible() {
        let mut a = UniformSampler::new(1);
        let mut b = UniformSampler::new(2);
        a.reseed(99);
        b.reseed(99);
        assert_eq!(
            a.sample(&request(12, 10)).unwrap(),
            b.sample(&request(12, 10)).unwrap()
        );
    }

    #[test]
    fn test_boxed_sampler_delegates() {
        let mut boxed: Box<dyn Sampler> = Box::new(UniformSampler::new(3));
        assert_eq!(boxed.name(), "uniform");
        assert_eq!(boxed.sample(&request(5, 2)).unwrap().len(), 2);
    }
}
