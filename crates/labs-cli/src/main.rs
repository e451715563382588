//! LABS QAOA seeder command-line interface.
//!
//! ```text
//! labs-qaoa search -n 12 --gamma-grid 0.05:0.8:8 --betas 0.1,0.2,0.3 \
//!     --shots-score 200 --shots-final 2000 --top-k 3 --output best.json
//! labs-qaoa energy 0010111
//! labs-qaoa interactions -n 8 --list
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{energy, interactions, search, version};

/// labs-qaoa - depth-1 QAOA parameter search for low-autocorrelation binary sequences
#[derive(Parser)]
#[command(name = "labs-qaoa")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the two-stage parameter search and report the best sequence
    Search(search::SearchArgs),

    /// Compute the LABS energy of a bitstring
    Energy {
        /// Bitstring of 0/1 characters, qubit 0 first
        bits: String,
    },

    /// Count or list the coupling terms for a problem size
    Interactions {
        /// Problem size N
        #[arg(short)]
        n: usize,

        /// Print the index tuples as JSON
        #[arg(short, long)]
        list: bool,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Search(args) => search::execute(&args),
        Commands::Energy { bits } => energy::execute(&bits),
        Commands::Interactions { n, list } => interactions::execute(n, list),
        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
