//! End-to-end tests for the two-stage search.

use labs_core::{
    BitSequence, FixedSampler, InteractionCache, Interactions, LabsError, SampleRequest, Sampler,
    SamplerError, SearchConfig, SearchOrchestrator, UniformSampler, energy, search_best_sequence,
};

/// Returns one sequence per call, cycling through `outputs`.
struct CyclingSampler {
    outputs: Vec<BitSequence>,
    calls: usize,
}

impl CyclingSampler {
    fn new(outputs: &[&str]) -> Self {
        Self {
            outputs: outputs.iter().map(|s| s.parse().unwrap()).collect(),
            calls: 0,
        }
    }
}

impl Sampler for CyclingSampler {
    fn name(&self) -> &str {
        "cycling"
    }

    fn reseed(&mut self, _seed: u64) {
        self.calls = 0;
    }

    fn sample(&mut self, request: &SampleRequest<'_>) -> Result<Vec<BitSequence>, SamplerError> {
        let bits = self.outputs[self.calls % self.outputs.len()].clone();
        self.calls += 1;
        Ok(vec![bits; request.shots])
    }
}

// ---------------------------------------------------------------------------
// Reference scenario
// ---------------------------------------------------------------------------

#[test]
fn fixed_sampler_eight_bits() {
    let fixed: BitSequence = "01010101".parse().unwrap();
    let config = SearchConfig::new(8, 10, 50, 1)
        .with_gammas(vec![0.1, 0.5])
        .with_betas(vec![0.1, 0.5])
        .with_cost_scale(2.0);

    let result = search_best_sequence(&config, FixedSampler::new(fixed.clone()), None).unwrap();

    // Independent evaluation: C_k = (-1)^k (8 - k).
    let expected: u64 = (1..8u64).map(|k| (8 - k) * (8 - k)).sum();
    assert_eq!(energy(&fixed), expected);

    assert_eq!(result.best_bits, Some(fixed));
    assert_eq!(result.best_energy, Some(expected));
    assert_eq!(result.best_params.len(), 1);
    // All four points tie, so the first scanned point is selected.
    assert_eq!(result.best_params[0].gamma, 0.1);
    assert_eq!(result.best_params[0].beta, 0.1);
    assert_eq!(result.meta.n_gammas, 2);
    assert_eq!(result.meta.n_betas, 2);
    assert_eq!(result.meta.seed, 123);
    assert_eq!(result.lens.pairs, Interactions::enumerate(8).num_pairs());
    assert_eq!(result.lens.quads, Interactions::enumerate(8).num_quads());
}

#[test]
fn precomputed_interactions_are_used() {
    let mut cache = InteractionCache::new();
    let interactions = cache.get(6);
    let config = SearchConfig::new(6, 2, 4, 1)
        .with_gammas(vec![0.2])
        .with_betas(vec![0.3]);

    let first = search_best_sequence(
        &config,
        UniformSampler::default(),
        Some((*interactions).clone()),
    )
    .unwrap();
    let second = search_best_sequence(&config, UniformSampler::default(), None).unwrap();

    assert_eq!(first.lens, second.lens);
    assert_eq!(cache.len(), 1);
}

#[test]
fn invalid_precomputed_interactions_are_rejected() {
    let config = SearchConfig::new(4, 1, 1, 1)
        .with_gammas(vec![0.1])
        .with_betas(vec![0.1]);
    let err = search_best_sequence(
        &config,
        FixedSampler::new(BitSequence::zeros(4)),
        Some(Interactions::enumerate(7)),
    )
    .unwrap_err();
    assert!(matches!(err, LabsError::InvalidInteraction { n: 4, .. }));
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

#[test]
fn same_seed_same_result() {
    let config = SearchConfig::new(10, 8, 32, 2)
        .with_gammas(vec![0.1, 0.3, 0.5])
        .with_betas(vec![0.2, 0.4])
        .with_seed(2024);

    let a = search_best_sequence(&config, UniformSampler::new(1), None).unwrap();
    let b = search_best_sequence(&config, UniformSampler::new(99), None).unwrap();
    assert_eq!(a, b);
    assert!(a.found());
}

#[test]
fn orchestrator_can_be_reused() {
    let config = SearchConfig::new(7, 4, 8, 1)
        .with_gammas(vec![0.1, 0.2])
        .with_betas(vec![0.3]);
    let interactions = Interactions::enumerate(7);

    let mut orch = SearchOrchestrator::new(UniformSampler::default());
    let first = orch.run(&config, &interactions).unwrap();
    let second = orch.run(&config, &interactions).unwrap();
    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// Monotonicity in top_k
// ---------------------------------------------------------------------------

#[test]
fn larger_top_k_never_worsens_best_energy() {
    let outputs = ["0000000", "0010111", "0000001", "0011101", "1111111", "0001011"];
    let mut previous: Option<u64> = None;

    for top_k in 1..=6 {
        let config = SearchConfig::new(7, 1, 1, top_k)
            .with_gammas(vec![0.1, 0.2, 0.3])
            .with_betas(vec![0.1, 0.2]);
        let result = search_best_sequence(&config, CyclingSampler::new(&outputs), None).unwrap();
        let best = result.best_energy.unwrap();
        if let Some(prev) = previous {
            assert!(best <= prev, "top_k = {top_k}: {best} > {prev}");
        }
        previous = Some(best);
    }
}

#[test]
fn negative_top_k_in_config_selects_nothing() {
    let config = SearchConfig::from_yaml(
        "n: 4\ngammas: [0.1, 0.2]\nbetas: [0.3]\nshots_score: 4\nshots_final: 8\ntop_k: -1\n",
    )
    .unwrap();

    let result = search_best_sequence(&config, UniformSampler::new(1), None).unwrap();
    assert!(result.best_params.is_empty());
    assert_eq!(result.best_bits, None);
    assert_eq!(result.best_energy, None);
}
