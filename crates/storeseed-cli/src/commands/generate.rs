//! `storeseed generate` command - Run the pipeline and write the tables.

use colored::Colorize;
use storeseed::{DatasetWriter, SeedConfig, SeedPipeline};

use crate::error::CliResult;

/// Execute the `generate` command.
pub fn execute(config: SeedConfig, quiet: bool) -> CliResult<()> {
    let writer = DatasetWriter::from_config(&config.output);

    if !quiet {
        println!("{} Generating seed dataset", "→".bright_cyan());
        println!(
            "  {} Seed: {}",
            "•".dimmed(),
            config.seed.to_string().bright_yellow()
        );
        println!(
            "  {} Output: {}",
            "•".dimmed(),
            writer.dir().display().to_string().bright_yellow()
        );
        println!();
    }

    let output = SeedPipeline::new(config)?.run()?;
    let written = writer.write(&output.dataset)?;

    if quiet {
        return Ok(());
    }

    println!("{}:", "Tables".bright_white().underline());
    for table in &written {
        println!(
            "  {} {:<12} {:>6} rows  {}",
            "✓".green(),
            table.name,
            table.rows,
            table.path.display().to_string().dimmed()
        );
    }
    println!();
    println!("{}:", "Summary".bright_white().underline());
    print!("{}", output.stats);

    if !output.stats.enrichment.is_clean() {
        println!();
        println!(
            "{} {} order item(s) have no catalog price",
            "Warning:".yellow(),
            output.stats.enrichment.unresolved.len()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use storeseed::output::TABLES;

    #[test]
    fn test_writes_tables_and_schema() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SeedConfig::default();
        config.customers.count = 20;
        config.products.count = 10;
        config.orders.count = 50;
        config.output.dir = dir.path().join("seed");

        execute(config, true).unwrap();

        for table in TABLES {
            assert!(dir.path().join("seed").join(table.file_name()).is_file());
        }
        assert!(dir.path().join("seed").join("schema.sql").is_file());
    }

    #[test]
    fn test_schema_can_be_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SeedConfig::default();
        config.orders.count = 10;
        config.output.dir = dir.path().to_path_buf();
        config.output.write_schema = false;

        execute(config, true).unwrap();
        assert!(dir.path().join("orders.csv").is_file());
        assert!(!dir.path().join("schema.sql").exists());
    }
}
