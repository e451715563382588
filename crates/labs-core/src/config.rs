//! Search configuration.
//!
//! A [`SearchConfig`] can be built in code or loaded from a YAML or JSON
//! file. Parameter axes accept either an explicit list or an inclusive grid:
//!
//! ```yaml
//! n: 12
//! gammas: { start: 0.05, stop: 0.8, points: 8 }
//! betas: [0.1, 0.2, 0.3, 0.4]
//! shots_score: 200
//! shots_final: 2000
//! top_k: 3
//! cost_scale: 2.0
//! seed: 123
//! target: nvidia
//! ```

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{LabsError, LabsResult};

/// Default scale applied to `gamma` for the cost rotation angle.
pub const DEFAULT_COST_SCALE: f64 = 2.0;

/// Default seed for samplers that honor reseeding.
pub const DEFAULT_SEED: u64 = 123;

/// One parameter axis: explicit values or an inclusive linear grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GridSpec {
    /// Explicit values, scanned in order.
    Values(Vec<f64>),
    /// `points` evenly spaced values from `start` to `stop` inclusive.
    Linspace {
        /// First value.
        start: f64,
        /// Last value.
        stop: f64,
        /// Number of values.
        points: usize,
    },
}

impl GridSpec {
    /// Expand the axis into its values.
    ///
    /// A grid with one point yields `[start]`; zero points yield nothing.
    pub fn values(&self) -> Vec<f64> {
        match self {
            GridSpec::Values(v) => v.clone(),
            GridSpec::Linspace { start, stop, points } => linspace(*start, *stop, *points),
        }
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        GridSpec::Values(Vec::new())
    }
}

impl From<Vec<f64>> for GridSpec {
    fn from(values: Vec<f64>) -> Self {
        GridSpec::Values(values)
    }
}

/// Evenly spaced values from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (points - 1) as f64;
            (0..points)
                .map(|i| {
                    if i == points - 1 {
                        stop
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// Configuration of a two-stage search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Problem size N.
    pub n: usize,
    /// Cost parameters to scan (outer loop).
    #[serde(default)]
    pub gammas: GridSpec,
    /// Mixer parameters to scan (inner loop).
    #[serde(default)]
    pub betas: GridSpec,
    /// Shots per parameter point in the coarse scan.
    pub shots_score: usize,
    /// Shots per selected point in the refinement stage.
    pub shots_final: usize,
    /// Number of coarse points to refine. Negative values read as 0.
    #[serde(deserialize_with = "deserialize_top_k")]
    pub top_k: usize,
    /// Scale applied to `gamma` for the cost rotation angle.
    #[serde(default = "default_cost_scale")]
    pub cost_scale: f64,
    /// Seed handed to the sampler before the scan.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Optional execution target label, echoed in results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

fn default_cost_scale() -> f64 {
    DEFAULT_COST_SCALE
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

/// Refinement count from a signed input; anything at or below zero
/// selects nothing.
pub fn clamp_top_k(raw: i64) -> usize {
    usize::try_from(raw).unwrap_or(0)
}

fn deserialize_top_k<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    i64::deserialize(deserializer).map(clamp_top_k)
}

impl SearchConfig {
    /// Create a configuration with empty parameter axes and default scale and seed.
    pub fn new(n: usize, shots_score: usize, shots_final: usize, top_k: usize) -> Self {
        Self {
            n,
            gammas: GridSpec::default(),
            betas: GridSpec::default(),
            shots_score,
            shots_final,
            top_k,
            cost_scale: DEFAULT_COST_SCALE,
            seed: DEFAULT_SEED,
            target: None,
        }
    }

    /// Set the gamma axis.
    #[must_use]
    pub fn with_gammas(mut self, gammas: impl Into<GridSpec>) -> Self {
        self.gammas = gammas.into();
        self
    }

    /// Set the beta axis.
    #[must_use]
    pub fn with_betas(mut self, betas: impl Into<GridSpec>) -> Self {
        self.betas = betas.into();
        self
    }

    /// Set the cost rotation scale.
    #[must_use]
    pub fn with_cost_scale(mut self, cost_scale: f64) -> Self {
        self.cost_scale = cost_scale;
        self
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the execution target label.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Expanded gamma values.
    pub fn gamma_values(&self) -> Vec<f64> {
        self.gammas.values()
    }

    /// Expanded beta values.
    pub fn beta_values(&self) -> Vec<f64> {
        self.betas.values()
    }

    /// Reject configurations the search cannot run.
    ///
    /// Empty axes, zero shots and `top_k` of 0 are valid and produce an
    /// empty result.
    pub fn validate(&self) -> LabsResult<()> {
        if self.n == 0 {
            return Err(LabsError::InvalidConfig("n must be at least 1".into()));
        }
        if !self.cost_scale.is_finite() {
            return Err(LabsError::InvalidConfig(format!(
                "cost_scale must be finite, got {}",
                self.cost_scale
            )));
        }
        for (axis, values) in [("gamma", self.gamma_values()), ("beta", self.beta_values())] {
            if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
                return Err(LabsError::InvalidConfig(format!(
                    "{axis} values must be finite, got {bad}"
                )));
            }
        }
        Ok(())
    }

    /// Parse a YAML document.
    pub fn from_yaml(source: &str) -> LabsResult<Self> {
        Ok(serde_yaml_ng::from_str(source)?)
    }

    /// Parse a JSON document.
    pub fn from_json(source: &str) -> LabsResult<Self> {
        serde_json::from_str(source).map_err(|e| LabsError::InvalidConfig(e.to_string()))
    }

    /// Load a configuration file, choosing the format by extension.
    ///
    /// `.json` is parsed as JSON; everything else as YAML.
    pub fn from_file(path: &Path) -> LabsResult<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| LabsError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext.to_lowercase().as_str() {
            "json" => Self::from_json(&source),
            _ => Self::from_yaml(&source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(0.3, 1.0, 1), vec![0.3]);
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        let v = linspace(0.1, 0.7, 4);
        assert_eq!(v.len(), 4);
        assert_eq!(*v.last().unwrap(), 0.7);
    }

    #[test]
    fn test_yaml_with_grid_and_defaults() {
        let config = SearchConfig::from_yaml(
            r"
n: 10
gammas: { start: 0.0, stop: 0.5, points: 3 }
betas: [0.1, 0.2]
shots_score: 20
shots_final: 100
top_k: 2
",
        )
        .unwrap();

        assert_eq!(config.n, 10);
        assert_eq!(config.gamma_values(), vec![0.0, 0.25, 0.5]);
        assert_eq!(config.beta_values(), vec![0.1, 0.2]);
        assert_eq!(config.cost_scale, DEFAULT_COST_SCALE);
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.target, None);
    }

    #[test]
    fn test_json() {
        let config = SearchConfig::from_json(
            r#"{"n": 6, "gammas": [0.4], "betas": [0.3], "shots_score": 1,
                "shots_final": 2, "top_k": 1, "seed": 7, "target": "nvidia"}"#,
        )
        .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.target.as_deref(), Some("nvidia"));
    }

    #[test]
    fn test_negative_top_k_reads_as_zero() {
        let config = SearchConfig::from_yaml(
            "n: 4\ngammas: [0.1]\nbetas: [0.1]\nshots_score: 2\nshots_final: 2\ntop_k: -1\n",
        )
        .unwrap();
        assert_eq!(config.top_k, 0);
        assert!(config.validate().is_ok());

        let config = SearchConfig::from_json(
            r#"{"n": 4, "shots_score": 1, "shots_final": 1, "top_k": -7}"#,
        )
        .unwrap();
        assert_eq!(config.top_k, 0);

        assert_eq!(clamp_top_k(i64::MIN), 0);
        assert_eq!(clamp_top_k(0), 0);
        assert_eq!(clamp_top_k(5), 5);
    }

    #[test]
    fn test_missing_field_is_config_error() {
        let err = SearchConfig::from_yaml("n: 4\n").unwrap_err();
        assert!(matches!(err, LabsError::InvalidConfig(_)));
    }

    #[test]
    fn test_validate() {
        let ok = SearchConfig::new(4, 1, 1, 1).with_gammas(vec![0.1]);
        assert!(ok.validate().is_ok());

        assert!(SearchConfig::new(0, 1, 1, 1).validate().is_err());
        assert!(
            SearchConfig::new(4, 1, 1, 1)
                .with_cost_scale(f64::NAN)
                .validate()
                .is_err()
        );
        assert!(
            SearchConfig::new(4, 1, 1, 1)
                .with_betas(vec![f64::INFINITY])
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("search.yaml");
        std::fs::write(
            &yaml,
            "n: 5\nshots_score: 1\nshots_final: 1\ntop_k: 1\n",
        )
        .unwrap();
        assert_eq!(SearchConfig::from_file(&yaml).unwrap().n, 5);

        let json = dir.path().join("search.json");
        std::fs::write(
            &json,
            r#"{"n": 3, "shots_score": 1, "shots_final": 1, "top_k": 1}"#,
        )
        .unwrap();
        assert_eq!(SearchConfig::from_file(&json).unwrap().n, 3);

        let missing = dir.path().join("absent.yaml");
        assert!(matches!(
            SearchConfig::from_file(&missing),
            Err(LabsError::Io(_))
        ));
    }
}
