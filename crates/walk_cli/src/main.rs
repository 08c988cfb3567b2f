//! Walk CLI - Random Walk Simulation from the Command Line
//!
//! Operational entry point for the walk engines.
//!
//! # Commands
//!
//! - `walk simulate` - Simulate a trajectory table and print it
//! - `walk stats` - Per-timestep mean and variance against the closed forms
//! - `walk check` - Cross-engine consistency grid
//! - `walk timing` - Wall-clock comparison of the engines

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use config::{build_config, CliArgs};
use output::OutputFormat;

/// Biased random walk simulator
#[derive(Parser)]
#[command(name = "walk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(flatten)]
    walk: WalkArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Walk parameter overrides shared by every command
#[derive(Args, Debug, Default)]
struct WalkArgs {
    /// Probability of a +1 step
    #[arg(short, long, global = true)]
    p: Option<f64>,

    /// Timesteps per trajectory
    #[arg(short = 't', long, global = true)]
    steps: Option<usize>,

    /// Number of trajectories
    #[arg(short = 'n', long, global = true)]
    trajectories: Option<usize>,

    /// Seed for the random stream
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Draw order (row-major, per-row)
    #[arg(long, global = true)]
    draw_order: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a trajectory table
    Simulate {
        /// Engine (scalar, vectorized, batch)
        #[arg(short, long, default_value = "batch")]
        engine: String,

        /// Spread rows over all cores (batch engine only)
        #[arg(long)]
        parallel: bool,

        /// Output format (table, csv, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Summarise a batch simulation per timestep
    Stats {
        /// Report every k-th timestep (defaults to about ten rows)
        #[arg(short, long)]
        every: Option<usize>,

        /// Output format (table, csv, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Verify that all engines agree
    Check {
        /// Absolute tolerance per timestep
        #[arg(long, default_value = "0")]
        tolerance: f64,
    },

    /// Time every engine on identical parameters
    Timing {
        /// Runs per engine
        #[arg(short, long, default_value = "5")]
        repeats: usize,
    },
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        CliArgs {
            config_file: self.config.clone(),
            p: self.walk.p,
            steps: self.walk.steps,
            trajectories: self.walk.trajectories,
            seed: self.walk.seed,
            draw_order: self.walk.draw_order.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.config_args())?;

    init_tracing(config.log_level.as_filter_str());

    let params = config.parameters()?;
    info!(
        p = params.p(),
        steps = params.steps(),
        trajectories = params.trajectories(),
        seed = params.seed(),
        order = %params.draw_order(),
        "Walk configuration loaded"
    );

    match cli.command {
        Commands::Simulate {
            engine,
            parallel,
            format,
        } => {
            let format: OutputFormat = format.parse().map_err(CliError::InvalidArgument)?;
            commands::simulate::run(&params, &engine, parallel, format)
        }
        Commands::Stats { every, format } => {
            let format: OutputFormat = format.parse().map_err(CliError::InvalidArgument)?;
            commands::stats::run(&params, every, format)
        }
        Commands::Check { tolerance } => commands::check::run(&params, tolerance),
        Commands::Timing { repeats } => commands::timing::run(&params, repeats),
    }
}
