//! Search command implementation.
//!
//! `labs-qaoa search [--config <file>] -n <N> --gammas <list>|--gamma-grid <a:b:n> ...`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use tracing::warn;

use labs_core::export::{ExportConfig, SearchReport};
use labs_core::{
    GridSpec, Interactions, SearchConfig, SearchOrchestrator, SearchResult, clamp_top_k,
};

use super::common::{SamplerKind, build_sampler, create_progress_bar, parse_grid, print_field};

/// Stage-1 shots per point when neither the file nor the flags set them.
pub const DEFAULT_SHOTS_SCORE: usize = 200;
/// Stage-2 shots per point when neither the file nor the flags set them.
pub const DEFAULT_SHOTS_FINAL: usize = 2000;
/// Refined points when neither the file nor the flags set them.
pub const DEFAULT_TOP_K: usize = 3;

/// Arguments of `labs-qaoa search`.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search configuration file (YAML, or JSON by extension)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Problem size N
    #[arg(short)]
    pub n: Option<usize>,

    /// Comma-separated gamma values
    #[arg(
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        conflicts_with = "gamma_grid"
    )]
    pub gammas: Option<Vec<f64>>,

    /// Gamma grid as start:stop:points (inclusive)
    #[arg(long, value_parser = parse_grid, allow_hyphen_values = true)]
    pub gamma_grid: Option<GridSpec>,

    /// Comma-separated beta values
    #[arg(
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        conflicts_with = "beta_grid"
    )]
    pub betas: Option<Vec<f64>>,

    /// Beta grid as start:stop:points (inclusive)
    #[arg(long, value_parser = parse_grid, allow_hyphen_values = true)]
    pub beta_grid: Option<GridSpec>,

    /// Shots per point in the coarse scan
    #[arg(long)]
    pub shots_score: Option<usize>,

    /// Shots per selected point in the refinement stage
    #[arg(long)]
    pub shots_final: Option<usize>,

    /// Number of coarse points to refine (0 or less refines nothing)
    #[arg(long, allow_negative_numbers = true)]
    pub top_k: Option<i64>,

    /// Scale applied to gamma for the cost rotation
    #[arg(long)]
    pub cost_scale: Option<f64>,

    /// Sampler seed
    #[arg(long, env = "LABS_QAOA_SEED")]
    pub seed: Option<u64>,

    /// Execution target label, echoed in the result
    #[arg(long)]
    pub target: Option<String>,

    /// Sampler: uniform, fixed:<bits> or replay:<archive.json>
    #[arg(long, default_value = "uniform")]
    pub sampler: SamplerKind,

    /// Matching tolerance for replay archives
    #[arg(long, default_value = "1e-9")]
    pub replay_tolerance: f64,

    /// Output file for the JSON report (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write compact JSON
    #[arg(long)]
    pub compact: bool,
}

/// Merge the configuration file, if any, with command-line overrides.
pub fn resolve_config(args: &SearchArgs) -> Result<SearchConfig> {
    let mut config = match &args.config {
        Some(path) => SearchConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => {
            let n = args
                .n
                .context("problem size missing: pass -n or --config")?;
            SearchConfig::new(n, DEFAULT_SHOTS_SCORE, DEFAULT_SHOTS_FINAL, DEFAULT_TOP_K)
        }
    };

    if let Some(n) = args.n {
        config.n = n;
    }
    if let Some(gammas) = &args.gammas {
        config.gammas = GridSpec::Values(gammas.clone());
    }
    if let Some(grid) = &args.gamma_grid {
        config.gammas = grid.clone();
    }
    if let Some(betas) = &args.betas {
        config.betas = GridSpec::Values(betas.clone());
    }
    if let Some(grid) = &args.beta_grid {
        config.betas = grid.clone();
    }
    if let Some(shots) = args.shots_score {
        config.shots_score = shots;
    }
    if let Some(shots) = args.shots_final {
        config.shots_final = shots;
    }
    if let Some(top_k) = args.top_k {
        config.top_k = clamp_top_k(top_k);
    }
    if let Some(scale) = args.cost_scale {
        config.cost_scale = scale;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(target) = &args.target {
        config.target = Some(target.clone());
    }

    config.validate()?;
    Ok(config)
}

/// Execute the search command.
pub fn execute(args: &SearchArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let n_points = config.gamma_values().len() * config.beta_values().len();
    if n_points == 0 {
        warn!("empty parameter grid; the search will not sample anything");
    }

    let sampler = build_sampler(&args.sampler, config.seed, args.replay_tolerance)?;
    let interactions = Interactions::enumerate(config.n);

    // Capture CLI args for reproducibility
    let cli_args: Vec<String> = std::env::args().collect();

    let total = n_points + n_points.min(config.top_k);
    let pb = create_progress_bar(total as u64)?;
    let mut orchestrator = SearchOrchestrator::new(sampler);
    let result = orchestrator.run_with_progress(&config, &interactions, |event| {
        pb.set_message(format!(
            "{} gamma={:.4} beta={:.4}",
            event.stage, event.gamma, event.beta
        ));
        pb.inc(1);
    });
    pb.finish_and_clear();
    let result = result?;

    let export = ExportConfig {
        pretty: !args.compact,
    };
    let report = SearchReport::new(result, &cli_args);

    if let Some(output_path) = &args.output {
        labs_core::export::to_file(&report, output_path, &export)?;
        eprintln!(
            "{} Report written to {}",
            style("OK").green().bold(),
            output_path.display()
        );
    } else {
        println!("{}", labs_core::export::to_json(&report, &export)?);
    }

    print_summary(&report.result, &args.sampler, args.output.as_deref());
    Ok(())
}

fn print_summary(result: &SearchResult, sampler: &SamplerKind, output: Option<&Path>) {
    eprintln!();
    eprintln!("{}", style("Search Summary").bold().underlined());
    print_field("N", result.n);
    print_field(
        "Couplings",
        format!("{} pairs, {} quads", result.lens.pairs, result.lens.quads),
    );
    print_field(
        "Grid",
        format!(
            "{} x {} points, {} shots each",
            result.meta.n_gammas, result.meta.n_betas, result.meta.shots_score
        ),
    );
    print_field(
        "Refined",
        format!(
            "{} points, {} shots each",
            result.best_params.len(),
            result.meta.shots_final
        ),
    );
    print_field("Sampler", sampler);

    match (&result.best_bits, result.best_energy) {
        (Some(bits), Some(energy)) => {
            print_field("Best", style(bits).cyan());
            print_field("Energy", style(energy).green().bold());
            if let Some(point) = result.best_params.first() {
                print_field(
                    "Top point",
                    format!("gamma={:.4} beta={:.4}", point.gamma, point.beta),
                );
            }
        }
        _ => print_field("Best", style("none (nothing sampled)").yellow()),
    }

    if let Some(path) = output {
        print_field("Output", path.display());
    }
}
