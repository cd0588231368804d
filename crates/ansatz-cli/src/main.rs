//! Ansatz command-line interface.
//!
//! Builds gate-level and pulse-level variational ansätze and lattice spin
//! Hamiltonians, and writes them as JSON or YAML.
//!
//! ```text
//! ansatz rvb -n 4 -r 2
//! ansatz hva -n 6 --bell-pairs -f yaml
//! ansatz cr -n 3 --pair 0:1 --pair 1:2 --backend lab.yaml -o cr.json
//! ansatz cr --config ansatz.yaml
//! ansatz heisenberg -n 8 --periodic --onsite 0.5
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::common::{OutputFormat, parse_pair};
use commands::{cr, heisenberg, hva, rvb, version};

/// Ansatz - variational circuits and pulse schedules for quantum chemistry
#[derive(Parser)]
#[command(name = "ansatz")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json", global = true)]
    format: OutputFormat,

    /// Output file (stdout if omitted)
    #[arg(short, long, global = true)]
    output: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a resonating-valence-bond ansatz
    Rvb {
        /// Number of qubits (must be even)
        #[arg(short, long)]
        num_qubits: u32,

        /// Number of repetitions
        #[arg(short, long, default_value = "1")]
        reps: usize,
    },

    /// Build a Hamiltonian variational ansatz
    Hva {
        /// Number of qubits (must be even)
        #[arg(short, long)]
        num_qubits: u32,

        /// Number of repetitions
        #[arg(short, long, default_value = "1")]
        reps: usize,

        /// Prepare Bell pairs before the first layer
        #[arg(long)]
        bell_pairs: bool,
    },

    /// Build a pulse-level cross-resonance ansatz with calibrations
    Cr {
        /// YAML configuration file
        #[arg(short, long, conflicts_with = "num_qubits")]
        config: Option<String>,

        /// Number of qubits
        #[arg(short, long, required_unless_present = "config")]
        num_qubits: Option<u32>,

        /// Number of layers
        #[arg(short, long)]
        reps: Option<usize>,

        /// Entangling pair as CONTROL:TARGET (repeatable; interleaved if omitted)
        #[arg(long = "pair", value_parser = parse_pair)]
        pairs: Vec<(u32, u32)>,

        /// Add a virtual rz after every rx
        #[arg(long)]
        add_rz: bool,

        /// Omit the closing rx layer
        #[arg(long)]
        no_final_rx: bool,

        /// Backend configuration file (JSON or YAML)
        #[arg(short, long)]
        backend: Option<String>,

        /// Maximum cross-resonance duration in samples
        #[arg(long)]
        max_duration: Option<f64>,

        /// Physical qubit for each program qubit
        #[arg(long, value_delimiter = ',')]
        physical_qubits: Option<Vec<u32>>,
    },

    /// Build a Heisenberg Hamiltonian on a line lattice
    Heisenberg {
        /// Number of sites
        #[arg(short, long)]
        num_sites: usize,

        /// Coupling strength between neighbours
        #[arg(long, default_value = "1.0", allow_hyphen_values = true)]
        interaction: f64,

        /// On-site field strength
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        onsite: f64,

        /// Close the chain into a ring
        #[arg(long)]
        periodic: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("ANSATZ_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let output = cli.output.as_deref();
    let result = match cli.command {
        Commands::Rvb { num_qubits, reps } => rvb::execute(num_qubits, reps, cli.format, output),

        Commands::Hva {
            num_qubits,
            reps,
            bell_pairs,
        } => hva::execute(num_qubits, reps, bell_pairs, cli.format, output),

        Commands::Cr {
            config,
            num_qubits,
            reps,
            pairs,
            add_rz,
            no_final_rx,
            backend,
            max_duration,
            physical_qubits,
        } => cr::execute(
            &cr::CrArgs {
                config,
                num_qubits,
                reps,
                pairs,
                add_rz,
                no_final_rx,
                backend,
                max_duration,
                physical_qubits,
            },
            cli.format,
            output,
        ),

        Commands::Heisenberg {
            num_sites,
            interaction,
            onsite,
            periodic,
        } => heisenberg::execute(num_sites, interaction, onsite, periodic, cli.format, output),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
