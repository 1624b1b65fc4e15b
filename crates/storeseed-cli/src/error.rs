//! Error types for the storeseed CLI.

use storeseed::SeedError;
use thiserror::Error;

/// CLI result type alias.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type.
#[derive(Error, Debug)]
pub enum CliError {
    /// Generation, configuration or output failure from the library.
    #[error(transparent)]
    Seed(#[from] SeedError),

    /// IO error while writing to the terminal.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file given on the command line does not exist.
    #[error("Configuration file not found: {0}")]
    ConfigNotFound(String),
}
