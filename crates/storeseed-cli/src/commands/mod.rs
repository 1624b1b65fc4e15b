//! CLI command implementations.

pub mod check;
pub mod generate;
pub mod schema;

use crate::error::{CliError, CliResult};
use std::path::PathBuf;
use storeseed::SeedConfig;
use tracing::debug;

/// Command line settings layered over the configuration file.
#[derive(Debug, Default)]
pub struct Overrides {
    /// Configuration file; environment variables only when absent.
    pub config: Option<PathBuf>,
    /// Replaces `seed`.
    pub seed: Option<u64>,
    /// Replaces `output.dir`.
    pub out: Option<PathBuf>,
}

impl Overrides {
    /// Load the configuration and apply the overrides.
    pub fn load(self) -> CliResult<SeedConfig> {
        let mut config = match &self.config {
            Some(path) if !path.exists() => {
                return Err(CliError::ConfigNotFound(path.display().to_string()))
            }
            Some(path) => SeedConfig::load(path)?,
            None => SeedConfig::from_env()?,
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(out) = self.out {
            config.output.dir = out;
        }

        config.validate()?;
        debug!(
            config = ?self.config,
            seed = config.seed,
            out = %config.output.dir.display(),
            "Resolved configuration"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let config = Overrides {
            config: None,
            seed: Some(9),
            out: Some(PathBuf::from("elsewhere")),
        }
        .load()
        .unwrap();

        assert_eq!(config.seed, 9);
        assert_eq!(config.output.dir, PathBuf::from("elsewhere"));
        assert_eq!(config.orders.count, 2200);
    }

    #[test]
    fn test_missing_config_file() {
        let result = Overrides {
            config: Some(PathBuf::from("does/not/exist.toml")),
            ..Default::default()
        }
        .load();

        assert!(matches!(result, Err(CliError::ConfigNotFound(_))));
    }
}
