//! Interactions command implementation.

use anyhow::Result;
use console::style;

use labs_core::Interactions;

/// Execute the interactions command.
pub fn execute(n: usize, list: bool) -> Result<()> {
    let interactions = Interactions::enumerate(n);

    if list {
        println!("{}", serde_json::to_string_pretty(&interactions)?);
        return Ok(());
    }

    println!("{} N = {}", style("Coupling terms").bold(), n);
    println!("  Pairs (G2):  {}", style(interactions.num_pairs()).cyan());
    println!("  Quads (G4):  {}", style(interactions.num_quads()).cyan());
    Ok(())
}
