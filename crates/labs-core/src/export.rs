//! JSON export of search results.
//!
//! A [`SearchReport`] wraps a [`SearchResult`] with a schema version, a UTC
//! timestamp and the information needed to reproduce the run.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LabsError, LabsResult};
use crate::search::SearchResult;

/// Version of the report layout.
pub const SCHEMA_VERSION: &str = "0.1.0";

/// How reports are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Indented multi-line JSON when set, a single line otherwise.
    pub pretty: bool,
}

impl ExportConfig {
    /// Single-line output.
    pub const COMPACT: Self = Self { pretty: false };
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Information for reproducing a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReproducibilityInfo {
    /// Version of this crate.
    pub labs_version: String,
    /// Command-line arguments of the run.
    pub cli_args: Vec<String>,
}

impl ReproducibilityInfo {
    /// Capture the current context.
    pub fn capture(cli_args: &[String]) -> Self {
        Self {
            labs_version: env!("CARGO_PKG_VERSION").to_string(),
            cli_args: cli_args.to_vec(),
        }
    }
}

/// A search result ready for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    /// Layout version.
    pub schema_version: String,
    /// When the report was created.
    pub timestamp: DateTime<Utc>,
    /// The search outcome.
    pub result: SearchResult,
    /// Reproduction context.
    pub reproducibility: ReproducibilityInfo,
}

impl SearchReport {
    /// Wrap a result, stamping it with the current time.
    pub fn new(result: SearchResult, cli_args: &[String]) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.into(),
            timestamp: Utc::now(),
            result,
            reproducibility: ReproducibilityInfo::capture(cli_args),
        }
    }
}

/// Render a report as JSON.
pub fn to_json(report: &SearchReport, config: &ExportConfig) -> LabsResult<String> {
    let rendered = match config.pretty {
        true => serde_json::to_string_pretty(report)?,
        false => serde_json::to_string(report)?,
    };
    Ok(rendered)
}

/// Write a report to `path`, newline-terminated.
pub fn to_file(report: &SearchReport, path: &Path, config: &ExportConfig) -> LabsResult<()> {
    let mut json = to_json(report, config)?;
    json.push('\n');
    std::fs::write(path, json)
        .map_err(|e| LabsError::Io(format!("cannot write report {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{CouplingCounts, SearchMeta};

    fn empty_result() -> SearchResult {
        SearchResult {
            n: 3,
            best_bits: None,
            best_energy: None,
            best_params: vec![],
            lens: CouplingCounts { pairs: 1, quads: 0 },
            meta: SearchMeta {
                shots_score: 1,
                shots_final: 1,
                top_k: 0,
                cost_scale: 2.0,
                seed: 123,
                target: None,
                n_gammas: 0,
                n_betas: 0,
                sampler: "fixed".into(),
            },
        }
    }

    #[test]
    fn test_compact_and_pretty() {
        let report = SearchReport::new(empty_result(), &["labs-qaoa".into()]);

        let compact = to_json(&report, &ExportConfig::COMPACT).unwrap();
        assert!(!compact.contains('\n'));
        assert!(compact.contains("\"schema_version\":\"0.1.0\""));
        assert!(compact.contains("\"best_bits\":null"));

        let pretty = to_json(&report, &ExportConfig::default()).unwrap();
        assert!(pretty.contains('\n'));
    }

    #[test]
    fn test_to_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = SearchReport::new(empty_result(), &[]);

        to_file(&report, &path, &ExportConfig::default()).unwrap();
        let back: SearchReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.result, report.result);
        assert_eq!(back.reproducibility.labs_version, env!("CARGO_PKG_VERSION"));
    }
}
