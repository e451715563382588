//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - QAOA seeding for low-autocorrelation binary sequences",
        style("labs-qaoa").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  labs-core            Energy, coupling terms and two-stage search");
    println!("  labs-adapter-replay  Sampler over recorded measurement counts");
    println!("  labs-cli             Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style(env!("CARGO_PKG_REPOSITORY")).underlined()
    );
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
