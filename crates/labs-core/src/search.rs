//! Two-stage QAOA parameter search.
//!
//! ```text
//!   gammas × betas ──→ Stage 1: score ──→ stable sort ──→ top_k ──→ Stage 2: refine ──→ best
//!                     (shots_score)                                 (shots_final)
//! ```
//!
//! Stage 1 samples every `(gamma, beta)` point (gammas outer, betas inner)
//! and ranks it by the best energy among its shots. Stage 2 resamples the
//! `top_k` best points with a larger budget and keeps the global best.
//!
//! The reported best always comes from stage 2. Stage 1 energies are drawn
//! with fewer shots and only rank the points, even when one of them is lower
//! than anything stage 2 finds.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::bits::BitSequence;
use crate::config::SearchConfig;
use crate::energy::Energy;
use crate::error::LabsResult;
use crate::interactions::Interactions;
use crate::sampler::{SampleRequest, Sampler, SamplerError};
use crate::select::{BestSample, select_best};

/// Coarse-scan score of one parameter point.
///
/// Serialized as `[energy, gamma, beta]`. `energy` is `None` when the point's
/// sample set was empty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    into = "(Option<Energy>, f64, f64)",
    from = "(Option<Energy>, f64, f64)"
)]
pub struct ScoredParameterPoint {
    /// Best energy seen at this point in stage 1.
    pub energy: Option<Energy>,
    /// Cost parameter.
    pub gamma: f64,
    /// Mixer parameter.
    pub beta: f64,
}

impl ScoredParameterPoint {
    /// Sort key: scored points ascending, unscored points last.
    fn rank(&self) -> (bool, Energy) {
        match self.energy {
            Some(e) => (false, e),
            None => (true, 0),
        }
    }
}

impl From<ScoredParameterPoint> for (Option<Energy>, f64, f64) {
    fn from(p: ScoredParameterPoint) -> Self {
        (p.energy, p.gamma, p.beta)
    }
}

impl From<(Option<Energy>, f64, f64)> for ScoredParameterPoint {
    fn from((energy, gamma, beta): (Option<Energy>, f64, f64)) -> Self {
        Self {
            energy,
            gamma,
            beta,
        }
    }
}

/// Number of coupling terms used by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouplingCounts {
    /// Two-body terms.
    #[serde(rename = "G2")]
    pub pairs: usize,
    /// Four-body terms.
    #[serde(rename = "G4")]
    pub quads: usize,
}

/// Configuration echoed back with a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMeta {
    /// Shots per point in stage 1.
    pub shots_score: usize,
    /// Shots per point in stage 2.
    pub shots_final: usize,
    /// Requested number of refined points.
    pub top_k: usize,
    /// Cost rotation scale.
    pub cost_scale: f64,
    /// Seed handed to the sampler.
    pub seed: u64,
    /// Execution target label.
    pub target: Option<String>,
    /// Number of gamma values scanned.
    pub n_gammas: usize,
    /// Number of beta values scanned.
    pub n_betas: usize,
    /// Name of the sampler used.
    pub sampler: String,
}

/// Outcome of a two-stage search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Problem size.
    #[serde(rename = "N")]
    pub n: usize,
    /// Best sequence found in stage 2.
    pub best_bits: Option<BitSequence>,
    /// Energy of `best_bits`.
    pub best_energy: Option<Energy>,
    /// Stage-1 points selected for refinement, in ranked order.
    pub best_params: Vec<ScoredParameterPoint>,
    /// Coupling term counts.
    pub lens: CouplingCounts,
    /// Echoed configuration.
    pub meta: SearchMeta,
}

impl SearchResult {
    /// True if stage 2 produced at least one sample.
    pub fn found(&self) -> bool {
        self.best_bits.is_some()
    }
}

/// Search stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Coarse grid scan.
    Score,
    /// Resampling of the selected points.
    Refine,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Score => write!(f, "score"),
            Stage::Refine => write!(f, "refine"),
        }
    }
}

/// Progress report emitted after every sampler call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchEvent {
    /// Current stage.
    pub stage: Stage,
    /// Zero-based index of the call within its stage.
    pub index: usize,
    /// Number of calls in this stage.
    pub total: usize,
    /// Cost parameter of the call.
    pub gamma: f64,
    /// Mixer parameter of the call.
    pub beta: f64,
    /// Best energy among the call's samples.
    pub energy: Option<Energy>,
}

/// Runs the two-stage search against a sampler.
pub struct SearchOrchestrator<S> {
    sampler: S,
}

impl<S: Sampler> SearchOrchestrator<S> {
    /// Create an orchestrator around `sampler`.
    pub fn new(sampler: S) -> Self {
        Self { sampler }
    }

    /// The wrapped sampler.
    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    /// Run the search.
    pub fn run(
        &mut self,
        config: &SearchConfig,
        interactions: &Interactions,
    ) -> LabsResult<SearchResult> {
        self.run_with_progress(config, interactions, |_| {})
    }

    /// Run the search, reporting every sampler call to `on_event`.
    ///
    /// The sampler is reseeded with `config.seed` first. Any sampler error
    /// aborts the search; nothing gathered before it is returned.
    #[instrument(skip_all, fields(n = config.n, top_k = config.top_k))]
    pub fn run_with_progress<F>(
        &mut self,
        config: &SearchConfig,
        interactions: &Interactions,
        mut on_event: F,
    ) -> LabsResult<SearchResult>
    where
        F: FnMut(&SearchEvent),
    {
        config.validate()?;
        interactions.validate(config.n)?;

        let gammas = config.gamma_values();
        let betas = config.beta_values();

        self.sampler.reseed(config.seed);

        // Stage 1: coarse scan.
        let total = gammas.len() * betas.len();
        info!(
            points = total,
            shots = config.shots_score,
            sampler = self.sampler.name(),
            "stage 1: scoring parameter grid"
        );
        let mut scored = Vec::with_capacity(total);
        for &gamma in &gammas {
            for &beta in &betas {
                let best = self.probe(config, interactions, gamma, beta, config.shots_score)?;
                let point = ScoredParameterPoint {
                    energy: best.map(|b| b.energy),
                    gamma,
                    beta,
                };
                on_event(&SearchEvent {
                    stage: Stage::Score,
                    index: scored.len(),
                    total,
                    gamma,
                    beta,
                    energy: point.energy,
                });
                scored.push(point);
            }
        }

        // Selection: stable, so equal energies keep scan order.
        scored.sort_by_key(ScoredParameterPoint::rank);
        scored.truncate(config.top_k);
        let selected = scored;

        // Stage 2: refinement.
        info!(
            selected = selected.len(),
            shots = config.shots_final,
            "stage 2: refining top parameters"
        );
        let mut global: Option<BestSample> = None;
        for (index, point) in selected.iter().enumerate() {
            let best = self.probe(
                config,
                interactions,
                point.gamma,
                point.beta,
                config.shots_final,
            )?;
            on_event(&SearchEvent {
                stage: Stage::Refine,
                index,
                total: selected.len(),
                gamma: point.gamma,
                beta: point.beta,
                energy: best.as_ref().map(|b| b.energy),
            });
            if let Some(candidate) = best {
                if global
                    .as_ref()
                    .is_none_or(|g| candidate.energy < g.energy)
                {
                    info!(
                        energy = candidate.energy,
                        gamma = point.gamma,
                        beta = point.beta,
                        bits = %candidate.bits,
                        "new best sequence"
                    );
                    global = Some(candidate);
                }
            }
        }

        let (best_bits, best_energy) = match global {
            Some(best) => (Some(best.bits), Some(best.energy)),
            None => (None, None),
        };

        Ok(SearchResult {
            n: config.n,
            best_bits,
            best_energy,
            best_params: selected,
            lens: CouplingCounts {
                pairs: interactions.num_pairs(),
                quads: interactions.num_quads(),
            },
            meta: SearchMeta {
                shots_score: config.shots_score,
                shots_final: config.shots_final,
                top_k: config.top_k,
                cost_scale: config.cost_scale,
                seed: config.seed,
                target: config.target.clone(),
                n_gammas: gammas.len(),
                n_betas: betas.len(),
                sampler: self.sampler.name().to_string(),
            },
        })
    }

    /// Sample one parameter point and reduce it to its best sequence.
    fn probe(
        &mut self,
        config: &SearchConfig,
        interactions: &Interactions,
        gamma: f64,
        beta: f64,
        shots: usize,
    ) -> LabsResult<Option<BestSample>> {
        let request = SampleRequest {
            n: config.n,
            pairs: &interactions.pairs,
            quads: &interactions.quads,
            gamma,
            beta,
            cost_scale: config.cost_scale,
            shots,
        };
        let samples = self.sampler.sample(&request)?;

        if samples.len() != shots {
            return Err(SamplerError::ShotMismatch {
                expected: shots,
                got: samples.len(),
            }
            .into());
        }
        if let Some(bad) = samples.iter().find(|s| s.len() != config.n) {
            return Err(SamplerError::LengthMismatch {
                expected: config.n,
                got: bad.len(),
            }
            .into());
        }

        let best = select_best(&samples);
        debug!(
            gamma,
            beta,
            shots,
            energy = best.as_ref().map(|b| b.energy),
            "sampled parameter point"
        );
        Ok(best)
    }
}
