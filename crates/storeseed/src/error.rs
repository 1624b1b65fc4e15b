//! Error types for dataset generation.

use thiserror::Error;

/// Result type for storeseed operations.
pub type Result<T> = std::result::Result<T, SeedError>;

/// Errors that can abort a generation run.
#[derive(Error, Debug)]
pub enum SeedError {
    /// A random parameter or input pool was outside its valid domain.
    #[error("Generation error: {0}")]
    Generation(String),

    /// Invalid or unreadable configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The generated dataset violated one or more integrity properties.
    #[error("Integrity check failed with {0} violation(s)")]
    Integrity(usize),

    /// CSV encoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SeedError {
    /// Create a generation error.
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<config::ConfigError> for SeedError {
    fn from(e: config::ConfigError) -> Self {
        SeedError::Config(e.to_string())
    }
}

impl From<rand_distr::NormalError> for SeedError {
    fn from(e: rand_distr::NormalError) -> Self {
        SeedError::Generation(format!("invalid normal distribution: {}", e))
    }
}

impl From<csv::IntoInnerError<csv::Writer<Vec<u8>>>> for SeedError {
    fn from(e: csv::IntoInnerError<csv::Writer<Vec<u8>>>) -> Self {
        SeedError::Io(e.into_error())
    }
}
