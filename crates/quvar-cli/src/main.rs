//! quvar Command-Line Interface
//!
//! Runs the worked VQE problems and YAML-described runs against the exact
//! statevector simulator.
//!
//! ```text
//! quvar ising --qubits 4 --seed 7
//! quvar root --b -4 --c 4
//! quvar run --config h2.yaml --json
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{ising, root, run};

/// quvar - variational eigensolvers on an exact statevector simulator
#[derive(Parser)]
#[command(name = "quvar")]
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
    /// Ground energy of the open ZZ Ising chain
    Ising {
        /// Number of sites
        #[arg(short, long, default_value = "4")]
        qubits: usize,

        /// Seed for the initial parameters
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Root magnitude of the monic quadratic x² + bx + c
    Root {
        /// Linear coefficient
        #[arg(long, allow_hyphen_values = true)]
        b: f64,

        /// Constant coefficient
        #[arg(long, allow_hyphen_values = true)]
        c: f64,

        /// Seed for the initial parameters
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Run a VQE described by a YAML file
    Run {
        /// Run configuration (YAML)
        #[arg(short, long)]
        config: String,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
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

    let result = match cli.command {
        Commands::Ising { qubits, seed } => ising::execute(qubits, seed),
        Commands::Root { b, c, seed } => root::execute(b, c, seed),
        Commands::Run { config, json } => run::execute(&config, json),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
