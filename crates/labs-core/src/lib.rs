//! LABS energy evaluation and two-stage QAOA parameter search.
//!
//! The Low Autocorrelation Binary Sequences (LABS) problem asks for a ±1
//! sequence whose aperiodic autocorrelations are as small as possible. This
//! crate provides the classical side of a depth-1 QAOA seeder for it:
//!
//! - **Energy**: the LABS energy of a bit sequence ([`energy::energy`])
//! - **Interactions**: the two- and four-body coupling terms of the cost
//!   function ([`Interactions`])
//! - **Sampler contract**: the capability that turns `(gamma, beta)` into
//!   candidate sequences ([`Sampler`])
//! - **Best-of selection** over a sample set ([`select::select_best`])
//! - **Search**: coarse grid scan, top-K selection and refinement
//!   ([`SearchOrchestrator`])
//!
//! # Architecture
//!
//! ```text
//! Interactions ──→ SearchOrchestrator ──→ Sampler ──→ select_best
//!                          ↑                              │
//!                          └──────── aggregation ─────────┘
//!                                        │
//!                                        v
//!                                   SearchResult
//! ```
//!
//! # Example
//!
//! ```rust
//! use labs_core::{FixedSampler, SearchConfig, search_best_sequence};
//!
//! let config = SearchConfig::new(8, 10, 50, 1)
//!     .with_gammas(vec![0.1, 0.5])
//!     .with_betas(vec![0.1, 0.5]);
//! let sampler = FixedSampler::new("01010101".parse().unwrap());
//!
//! let result = search_best_sequence(&config, sampler, None).unwrap();
//! assert_eq!(result.best_bits.unwrap().to_string(), "01010101");
//! ```

pub mod bits;
pub mod config;
pub mod energy;
pub mod error;
pub mod export;
pub mod interactions;
pub mod sampler;
pub mod search;
pub mod select;

pub use bits::{BitSequence, reverse_bits};
pub use config::{GridSpec, SearchConfig, clamp_top_k};
pub use energy::{Energy, energy};
pub use error::{LabsError, LabsResult};
pub use interactions::{CouplingPair, CouplingQuad, InteractionCache, Interactions};
pub use sampler::{FixedSampler, SampleRequest, Sampler, SamplerError, UniformSampler};
pub use search::{ScoredParameterPoint, SearchEvent, SearchOrchestrator, SearchResult, Stage};
pub use select::{BestSample, select_best};

/// Run a two-stage search.
///
/// Coupling terms are enumerated for `config.n` unless `interactions` is
/// given. The sampler is reseeded with `config.seed` before the scan.
pub fn search_best_sequence<S: Sampler>(
    config: &SearchConfig,
    sampler: S,
    interactions: Option<Interactions>,
) -> LabsResult<SearchResult> {
    let interactions = interactions.unwrap_or_else(|| Interactions::enumerate(config.n));
    SearchOrchestrator::new(sampler).run(config, &interactions)
}
