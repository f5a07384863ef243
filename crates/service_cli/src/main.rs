//! nlsolve - root finding for the cubic x^3 + 3x^2 - x - 3 = 0
//!
//! Runs the relaxation method and Newton's method over a configured set of
//! bracketing intervals and reports root, iteration counts, a-priori
//! estimates and convergence diagnostics for each.
//!
//! # Commands
//!
//! - `nlsolve solve` - Solve every configured problem
//! - `nlsolve problems` - List the configured problems
//!
//! # Configuration
//!
//! Settings come from `nlsolve.toml` (or `--config`), then `NLSOLVE_*`
//! environment variables, then command line flags.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;
mod precision;

pub use error::{CliError, Result};

use commands::solve::OutputFormat;
use config::{build_config, CliArgs, LogLevel};

/// Nonlinear equation solver CLI
#[derive(Parser)]
#[command(name = "nlsolve")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to nlsolve.toml when present)
    #[arg(short, long, global = true, env = "NLSOLVE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve every configured problem with both methods
    Solve {
        /// Precision; prompted for when neither given nor configured
        #[arg(short, long)]
        epsilon: Option<f64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Solve on the calling thread instead of the rayon pool
        #[arg(long)]
        sequential: bool,
    },

    /// List the configured problems
    Problems,
}

/// Initialise tracing; `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let epsilon = match &cli.command {
        Commands::Solve { epsilon, .. } => *epsilon,
        Commands::Problems => None,
    };

    let args = CliArgs {
        config_file: cli.config,
        log_level: cli.log_level,
        verbose: cli.verbose,
        epsilon,
    };
    let config = build_config(&args)?;

    init_tracing(config.log_level);
    info!(
        problems = config.problems.len(),
        max_iterations = config.max_iterations,
        "configuration loaded"
    );
    debug!(?config, "effective configuration");

    match cli.command {
        Commands::Solve {
            format, sequential, ..
        } => commands::solve::run(&config, format, sequential),
        Commands::Problems => commands::problems::run(&config),
    }
}
