//! Energy command implementation.

use anyhow::{Context, Result};
use console::style;

use labs_core::energy::autocorrelation;
use labs_core::{BitSequence, Energy, energy, reverse_bits};

/// Merit factor `N² / (2E)`, the usual figure of merit for LABS.
fn merit_factor(n: usize, energy: Energy) -> Option<f64> {
    (energy > 0).then(|| (n * n) as f64 / (2.0 * energy as f64))
}

/// Execute the energy command.
pub fn execute(bits: &str) -> Result<()> {
    let seq: BitSequence = bits
        .trim()
        .parse()
        .with_context(|| format!("Invalid bitstring '{bits}'"))?;
    let e = energy(&seq);
    let reversed = reverse_bits(&seq);

    println!("{} {}", style("Sequence:").bold(), style(&seq).cyan());
    println!("  Length:        {}", seq.len());
    println!("  Energy:        {}", style(e).green().bold());
    println!(
        "  Reversed:      {} (energy {})",
        reversed,
        energy(&reversed)
    );
    match merit_factor(seq.len(), e) {
        Some(f) => println!("  Merit factor:  {f:.4}"),
        None => println!("  Merit factor:  {}", style("undefined").dim()),
    }

    if seq.len() > 1 {
        let lags: Vec<String> = (1..seq.len())
            .map(|k| autocorrelation(&seq, k).to_string())
            .collect();
        println!("  C_k:           [{}]", lags.join(", "));
    }

    Ok(())
}
