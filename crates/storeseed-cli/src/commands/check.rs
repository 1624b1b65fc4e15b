//! `storeseed check` command - Generate in memory and verify integrity.

use colored::Colorize;
use storeseed::{IntegrityChecker, SeedConfig, SeedError, SeedOutput, SeedPipeline};

use crate::error::CliResult;

/// Violations listed before the report is truncated.
const MAX_LISTED: usize = 20;

/// Execute the `check` command.
pub fn execute(config: SeedConfig, quiet: bool) -> CliResult<()> {
    let checker = IntegrityChecker::from_config(&config)?;
    let output = SeedPipeline::new(config)?.run()?;
    report(&checker, &output, quiet)
}

/// Check a generated dataset, print the outcome, and fail on any violation.
fn report(checker: &IntegrityChecker, output: &SeedOutput, quiet: bool) -> CliResult<()> {
    let report = checker.check(&output.dataset);

    if report.is_ok() {
        if !quiet {
            println!(
                "{} Seed {} passed all integrity checks ({} orders, {} items, {} returns)",
                "✓".green(),
                output.stats.seed.to_string().bright_white(),
                output.stats.orders,
                output.stats.order_items,
                output.stats.returns
            );
        }
        return Ok(());
    }

    println!("{}:", "Integrity Report".bright_white().underline());
    for violation in report.violations.iter().take(MAX_LISTED) {
        println!("  {} {}", "✗".red(), violation);
    }
    if report.len() > MAX_LISTED {
        println!(
            "  {} ... and {} more",
            "•".dimmed(),
            report.len() - MAX_LISTED
        );
    }

    Err(SeedError::Integrity(report.len()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    fn small_config() -> SeedConfig {
        let mut config = SeedConfig::default();
        config.customers.count = 30;
        config.products.count = 20;
        config.orders.count = 200;
        config
    }

    #[test]
    fn test_clean_run_passes() {
        assert!(execute(small_config(), true).is_ok());
    }

    #[test]
    fn test_violations_fail_the_check() {
        let config = small_config();
        let checker = IntegrityChecker::from_config(&config).unwrap();
        let mut output = SeedPipeline::new(config).unwrap().run().unwrap();
        assert!(report(&checker, &output, true).is_ok());

        let duplicate = output.dataset.returns[0].clone();
        output.dataset.returns.push(duplicate);

        let err = report(&checker, &output, true).unwrap_err();
        assert!(matches!(err, CliError::Seed(SeedError::Integrity(n)) if n >= 1));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let mut config = small_config();
        config.returns.rate = 2.0;
        assert!(matches!(
            execute(config, true),
            Err(CliError::Seed(SeedError::Config(_)))
        ));
    }
}
