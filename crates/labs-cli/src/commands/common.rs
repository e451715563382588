//! Shared helpers for CLI commands.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use labs_adapter_replay::ReplaySampler;
use labs_core::{BitSequence, FixedSampler, GridSpec, Sampler, UniformSampler};

/// Which sampler a search runs against.
#[derive(Debug, Clone, PartialEq)]
pub enum SamplerKind {
    /// Uniformly random sequences.
    Uniform,
    /// One fixed sequence for every shot.
    Fixed(BitSequence),
    /// Counts recorded in a replay archive.
    Replay(PathBuf),
}

impl FromStr for SamplerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, arg) = match s.split_once(':') {
            Some((kind, arg)) => (kind, Some(arg)),
            None => (s, None),
        };
        match (kind.to_lowercase().as_str(), arg) {
            ("uniform", None) => Ok(SamplerKind::Uniform),
            ("fixed", Some(bits)) => bits
                .parse()
                .map(SamplerKind::Fixed)
                .map_err(|e| format!("invalid fixed sequence: {e}")),
            ("replay", Some(path)) if !path.is_empty() => {
                Ok(SamplerKind::Replay(PathBuf::from(path)))
            }
            _ => Err(format!(
                "unknown sampler '{s}'. Available: uniform, fixed:<bits>, replay:<archive.json>"
            )),
        }
    }
}

impl fmt::Display for SamplerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplerKind::Uniform => write!(f, "uniform"),
            SamplerKind::Fixed(bits) => write!(f, "fixed:{bits}"),
            SamplerKind::Replay(path) => write!(f, "replay:{}", path.display()),
        }
    }
}

/// Build the sampler named by `kind`.
pub fn build_sampler(
    kind: &SamplerKind,
    seed: u64,
    tolerance: f64,
) -> Result<Box<dyn Sampler>> {
    let sampler: Box<dyn Sampler> = match kind {
        SamplerKind::Uniform => Box::new(UniformSampler::new(seed)),
        SamplerKind::Fixed(bits) => Box::new(FixedSampler::new(bits.clone())),
        SamplerKind::Replay(path) => Box::new(
            ReplaySampler::from_file(path)
                .with_context(|| format!("Failed to load replay archive {}", path.display()))?
                .with_tolerance(tolerance),
        ),
    };
    Ok(sampler)
}

/// Parse a `start:stop:points` grid.
pub fn parse_grid(s: &str) -> Result<GridSpec, String> {
    let parts: Vec<&str> = s.split(':').collect();
    let [start, stop, points] = parts.as_slice() else {
        return Err(format!("expected start:stop:points, got '{s}'"));
    };
    let start: f64 = start
        .trim()
        .parse()
        .map_err(|e| format!("invalid grid start '{start}': {e}"))?;
    let stop: f64 = stop
        .trim()
        .parse()
        .map_err(|e| format!("invalid grid stop '{stop}': {e}"))?;
    let points: usize = points
        .trim()
        .parse()
        .map_err(|e| format!("invalid grid points '{points}': {e}"))?;
    Ok(GridSpec::Linspace {
        start,
        stop,
        points,
    })
}

/// Create the search progress bar.
pub fn create_progress_bar(len: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )?
        .progress_chars("#>-"),
    );
    Ok(pb)
}

/// Print a labelled summary line to stderr.
pub fn print_field(label: &str, value: impl fmt::Display) {
    eprintln!("  {:<12} {}", style(format!("{label}:")).dim(), value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampler_kind_parse() {
        assert_eq!("uniform".parse::<SamplerKind>(), Ok(SamplerKind::Uniform));
        assert_eq!(
            "fixed:0101".parse::<SamplerKind>(),
            Ok(SamplerKind::Fixed("0101".parse().unwrap()))
        );
        assert_eq!(
            "replay:runs/n8.json".parse::<SamplerKind>(),
            Ok(SamplerKind::Replay(PathBuf::from("runs/n8.json")))
        );
    }

    #[test]
    fn test_sampler_kind_errors() {
        assert!("fixed".parse::<SamplerKind>().is_err());
        assert!("fixed:01a".parse::<SamplerKind>().is_err());
        assert!("replay:".parse::<SamplerKind>().is_err());
        assert!("uniform:3".parse::<SamplerKind>().is_err());
        assert!("cudaq".parse::<SamplerKind>().is_err());
    }

    #[test]
    fn test_sampler_kind_display() {
        let kind: SamplerKind = "fixed:110".parse().unwrap();
        assert_eq!(kind.to_string(), "fixed:110");
    }

    #[test]
    fn test_parse_grid() {
        let grid = parse_grid("0.1:0.9:5").unwrap();
        assert_eq!(
            grid,
            GridSpec::Linspace {
                start: 0.1,
                stop: 0.9,
                points: 5
            }
        );
        assert_eq!(grid.values().len(), 5);

        assert!(parse_grid("0.1:0.9").is_err());
        assert!(parse_grid("a:0.9:5").is_err());
        assert!(parse_grid("0.1:0.9:-1").is_err());
    }

    #[test]
    fn test_build_sampler() {
        let fixed = build_sampler(&"fixed:01".parse().unwrap(), 1, 1e-9).unwrap();
        assert_eq!(fixed.name(), "fixed");
        let uniform = build_sampler(&SamplerKind::Uniform, 1, 1e-9).unwrap();
        assert_eq!(uniform.name(), "uniform");
        assert!(build_sampler(&SamplerKind::Replay("missing.json".into()), 1, 1e-9).is_err());
    }
}
