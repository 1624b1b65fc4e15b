//! storeseed CLI - generate, verify and describe the seeded storefront dataset.
//!
//! # Commands
//!
//! - `storeseed generate` - Run the pipeline and write the CSV tables
//! - `storeseed check` - Generate in memory and verify integrity
//! - `storeseed schema` - Print the table DDL
//!
//! # Examples
//!
//! ```bash
//! # Canonical run into ./seed
//! storeseed generate
//!
//! # Different seed, custom output directory
//! storeseed generate --seed 7 --out /tmp/seed
//!
//! # Verify a configured run without writing anything
//! storeseed check --config storeseed.toml
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

use commands::{check, generate, schema, Overrides};

/// storeseed - seeded synthetic storefront data
#[derive(Parser)]
#[command(name = "storeseed")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the dataset and write it as CSV
    Generate {
        /// Configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the random seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Override the output directory
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Generate in memory and run the integrity checks
    Check {
        /// Configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the random seed
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Print the CREATE TABLE statements for the six tables
    Schema,
}

fn setup_logging(verbose: bool, quiet: bool, level: &str) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { config, seed, out } => Overrides { config, seed, out }
            .load()
            .and_then(|config| {
                setup_logging(cli.verbose, cli.quiet, &config.logging.level);
                generate::execute(config, cli.quiet)
            }),

        Commands::Check { config, seed } => Overrides {
            config,
            seed,
            out: None,
        }
        .load()
        .and_then(|config| {
            setup_logging(cli.verbose, cli.quiet, &config.logging.level);
            check::execute(config, cli.quiet)
        }),

        Commands::Schema => {
            setup_logging(cli.verbose, cli.quiet, "warn");
            schema::execute()
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
