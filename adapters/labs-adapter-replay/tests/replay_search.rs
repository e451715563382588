//! Two-stage search driven by a replay archive.

use labs_adapter_replay::{Counts, ReplaySampler, ShotArchive};
use labs_core::{LabsError, SamplerError, SearchConfig, energy, search_best_sequence};

fn counts(entries: &[(&str, u64)]) -> Counts {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

/// A 5-bit archive over a 2x2 grid. The point (0.4, 0.3) holds the
/// lowest-energy outcome.
fn archive() -> ShotArchive {
    ShotArchive::new(5)
        .with_record(0.2, 0.1, counts(&[("00000", 10), ("11111", 5)]))
        .with_record(0.2, 0.3, counts(&[("00000", 4), ("01010", 4)]))
        .with_record(0.4, 0.1, counts(&[("11111", 1), ("00100", 2)]))
        .with_record(0.4, 0.3, counts(&[("00010", 7), ("00000", 1)]))
}

fn config() -> SearchConfig {
    SearchConfig::new(5, 20, 100, 2)
        .with_gammas(vec![0.2, 0.4])
        .with_betas(vec![0.1, 0.3])
}

#[test]
fn replay_finds_recorded_optimum() {
    let result = search_best_sequence(&config(), ReplaySampler::new(&archive()).unwrap(), None)
        .unwrap();

    let expected = "00010".parse().unwrap();
    assert_eq!(result.best_energy, Some(energy(&expected)));
    assert_eq!(result.best_bits, Some(expected));
    assert_eq!(result.meta.sampler, "replay");
    assert_eq!(result.best_params.len(), 2);
}

#[test]
fn replay_is_reproducible_under_seed() {
    let config = config().with_seed(99);
    let a = search_best_sequence(&config, ReplaySampler::new(&archive()).unwrap(), None).unwrap();
    let b = search_best_sequence(&config, ReplaySampler::new(&archive()).unwrap(), None).unwrap();
    assert_eq!(a, b);
}

#[test]
fn missing_point_aborts_search() {
    let config = config().with_gammas(vec![0.2, 0.6]);
    let err = search_best_sequence(&config, ReplaySampler::new(&archive()).unwrap(), None)
        .unwrap_err();
    assert!(matches!(err, LabsError::Sampler(SamplerError::Backend(_))));
}

#[test]
fn archive_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shots.json");
    archive().to_file(&path).unwrap();

    let sampler = ReplaySampler::from_file(&path).unwrap();
    assert_eq!(sampler.n(), 5);
    assert_eq!(sampler.num_points(), 4);
}
