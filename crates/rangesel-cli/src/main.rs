//! Rangesel CLI - inspect range statistics and overlap join estimates.
//!
//! Works on JSON statistics snapshots, so histograms can be examined and
//! estimates reproduced without a running planner.

mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Range overlap selectivity tool.
///
/// Loads histogram statistics from a snapshot file and reports the
/// selectivity the overlap join estimator would give the planner.
#[derive(Parser)]
#[command(name = "rangesel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "table")]
    format: OutputFormat,

    /// Estimator configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the estimator's shared bin count
    #[arg(long, global = true)]
    bins: Option<usize>,

    /// Suppress progress and info messages
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

/// Output format options.
#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table format (default for TTY)
    #[default]
    Table,
    /// Machine-readable JSON format
    Json,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Estimate the selectivity of `left && right`
    Estimate {
        /// Path to the statistics snapshot
        snapshot: PathBuf,

        /// Left attribute (relation.attribute)
        left: String,

        /// Right attribute (relation.attribute)
        right: String,

        /// Operator name used for the statistics access check
        #[arg(long, default_value = "&&")]
        operator: String,

        /// Treat the operator as leakproof
        #[arg(long)]
        leakproof: bool,
    },

    /// Show one attribute's histogram
    Inspect {
        /// Path to the statistics snapshot
        snapshot: PathBuf,

        /// Attribute (relation.attribute)
        attribute: String,
    },

    /// Show one attribute's histogram resampled onto an equal-width grid
    Resample {
        /// Path to the statistics snapshot
        snapshot: PathBuf,

        /// Attribute (relation.attribute)
        attribute: String,

        /// Grid lower bound (defaults to the histogram's domain)
        #[arg(long, allow_hyphen_values = true)]
        min: Option<f64>,

        /// Grid upper bound (defaults to the histogram's domain)
        #[arg(long, allow_hyphen_values = true)]
        max: Option<f64>,

        /// Number of grid bins
        #[arg(long = "grid-bins", default_value_t = 10)]
        grid_bins: usize,
    },

    /// List attributes in a snapshot
    List {
        /// Path to the statistics snapshot
        snapshot: PathBuf,
    },

    /// Check that every histogram in a snapshot is well-formed
    Validate {
        /// Path to the statistics snapshot
        snapshot: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    } else if !cli.quiet {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(std::io::stderr)
            .init();
    }

    let settings = commands::Settings {
        format: cli.format,
        quiet: cli.quiet,
        config: cli.config,
        bins: cli.bins,
    };

    let result = match cli.command {
        Commands::Estimate {
            snapshot,
            left,
            right,
            operator,
            leakproof,
        } => commands::estimate::run(&snapshot, &left, &right, &operator, leakproof, &settings),
        Commands::Inspect {
            snapshot,
            attribute,
        } => commands::inspect::run(&snapshot, &attribute, &settings),
        Commands::Resample {
            snapshot,
            attribute,
            min,
            max,
            grid_bins,
        } => commands::resample::run(&snapshot, &attribute, min, max, grid_bins, &settings),
        Commands::List { snapshot } => commands::list::run(&snapshot, &settings),
        Commands::Validate { snapshot } => commands::validate::run(&snapshot, &settings),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
