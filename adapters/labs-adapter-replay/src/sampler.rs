//! Sampler replaying a [`ShotArchive`].

use std::path::Path;

use labs_core::config::DEFAULT_SEED;
use labs_core::{BitSequence, SampleRequest, Sampler, SamplerError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::archive::ShotArchive;
use crate::error::{ReplayError, ReplayResult};

/// Default tolerance when matching a requested point to a record.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Outcomes of one record with their cumulative counts.
#[derive(Debug, Clone)]
struct Histogram {
    gamma: f64,
    beta: f64,
    outcomes: Vec<BitSequence>,
    cumulative: Vec<u64>,
}

impl Histogram {
    fn total(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Draw one outcome with probability proportional to its count.
    fn draw<R: Rng>(&self, rng: &mut R) -> &BitSequence {
        let r = rng.gen_range(0..self.total());
        let idx = self.cumulative.partition_point(|&c| c <= r);
        &self.outcomes[idx]
    }
}

/// Sampler drawing shots from recorded measurement counts.
///
/// Each request is matched to the record whose `(gamma, beta)` lies within
/// the tolerance of the requested point; the first matching record wins.
/// Shots are drawn with replacement, weighted by count, from a seeded
/// [`StdRng`], so the same seed yields the same sequences.
#[derive(Debug, Clone)]
pub struct ReplaySampler {
    n: usize,
    histograms: Vec<Histogram>,
    tolerance: f64,
    rng: StdRng,
}

impl ReplaySampler {
    /// Create a sampler over a validated archive.
    pub fn new(archive: &ShotArchive) -> ReplayResult<Self> {
        let mut histograms = Vec::with_capacity(archive.records.len());
        for record in &archive.records {
            let parsed = archive.parse_record(record)?;
            let mut running = 0u64;
            let (outcomes, cumulative) = parsed
                .into_iter()
                .map(|(bits, count)| {
                    running = running.saturating_add(count);
                    (bits, running)
                })
                .unzip();
            histograms.push(Histogram {
                gamma: record.gamma,
                beta: record.beta,
                outcomes,
                cumulative,
            });
        }

        debug!(
            n = archive.n,
            records = histograms.len(),
            "loaded replay archive"
        );

        Ok(Self {
            n: archive.n,
            histograms,
            tolerance: DEFAULT_TOLERANCE,
            rng: StdRng::seed_from_u64(DEFAULT_SEED),
        })
    }

    /// Load an archive file and create a sampler over it.
    pub fn from_file(path: &Path) -> ReplayResult<Self> {
        Self::new(&ShotArchive::from_file(path)?)
    }

    /// Set the matching tolerance for `gamma` and `beta`.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.abs();
        self
    }

    /// Problem size of the archive.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of recorded parameter points.
    pub fn num_points(&self) -> usize {
        self.histograms.len()
    }

    fn lookup(&self, gamma: f64, beta: f64) -> ReplayResult<usize> {
        let tol = self.tolerance;
        self.histograms
            .iter()
            .position(|h| (h.gamma - gamma).abs() <= tol && (h.beta - beta).abs() <= tol)
            .ok_or(ReplayError::PointNotFound { gamma, beta })
    }
}

impl Sampler for ReplaySampler {
    fn name(&self) -> &str {
        "replay"
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    #[instrument(
        skip_all,
        fields(
            gamma = request.gamma,
            beta = request.beta,
            cost_angle = request.cost_angle(),
            mixer_angle = request.mixer_angle(),
            shots = request.shots
        )
    )]
    fn sample(&mut self, request: &SampleRequest<'_>) -> Result<Vec<BitSequence>, SamplerError> {
        if request.n != self.n {
            return Err(SamplerError::LengthMismatch {
                expected: request.n,
                got: self.n,
            });
        }

        let idx = self.lookup(request.gamma, request.beta)?;
        let histogram = &self.histograms[idx];
        let rng = &mut self.rng;
        Ok((0..request.shots)
            .map(|_| histogram.draw(&mut *rng).clone())
            .collect())
    }
}
