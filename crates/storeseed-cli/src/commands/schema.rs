//! `storeseed schema` command - Print the table DDL.

use std::io::Write;

use crate::error::CliResult;

/// Execute the `schema` command.
pub fn execute() -> CliResult<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(storeseed::render_schema().as_bytes())?;
    stdout.flush()?;
    Ok(())
}
