//! CSV flush of the generated tables.

use super::{render_schema, TableRow};
use crate::config::OutputConfig;
use crate::error::Result;
use crate::factory::Dataset;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the DDL written next to the tables.
pub const SCHEMA_FILE: &str = "schema.sql";

/// A table flushed to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenTable {
    /// Table name.
    pub name: &'static str,
    /// File the table was written to.
    pub path: PathBuf,
    /// Data rows, header excluded.
    pub rows: usize,
    /// Bytes written.
    pub bytes: usize,
}

/// Writes a dataset as one CSV file per table.
#[derive(Debug, Clone)]
pub struct DatasetWriter {
    dir: PathBuf,
    write_schema: bool,
}

impl DatasetWriter {
    /// Writer targeting `dir`; the schema file is written too.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_schema: true,
        }
    }

    /// Writer configured from the output section.
    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.dir.clone()).with_schema(config.write_schema)
    }

    /// Enable or disable writing `schema.sql`.
    pub fn with_schema(mut self, write_schema: bool) -> Self {
        self.write_schema = write_schema;
        self
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write all six tables, plus the schema if enabled.
    pub fn write(&self, dataset: &Dataset) -> Result<Vec<WrittenTable>> {
        fs::create_dir_all(&self.dir)?;

        let written = vec![
            self.write_table(&dataset.customers)?,
            self.write_table(&dataset.products)?,
            self.write_table(&dataset.orders)?,
            self.write_table(&dataset.order_items)?,
            self.write_table(&dataset.shipments)?,
            self.write_table(&dataset.returns)?,
        ];

        if self.write_schema {
            let path = self.dir.join(SCHEMA_FILE);
            fs::write(&path, render_schema())?;
            debug!(path = %path.display(), "Wrote schema");
        }

        info!(
            dir = %self.dir.display(),
            tables = written.len(),
            "Seed tables written"
        );
        Ok(written)
    }

    /// Write a single table to `<dir>/<table>.csv`.
    pub fn write_table<T: TableRow>(&self, rows: &[T]) -> Result<WrittenTable> {
        let schema = T::schema();
        let path = self.dir.join(schema.file_name());
        let bytes = render_table(rows)?;
        fs::write(&path, &bytes)?;

        debug!(table = schema.name, rows = rows.len(), "Wrote table");
        Ok(WrittenTable {
            name: schema.name,
            path,
            rows: rows.len(),
            bytes: bytes.len(),
        })
    }
}

/// Encode rows as CSV with a header line.
pub fn render_table<T: TableRow>(rows: &[T]) -> Result<Vec<u8>> {
    let mut writer = ::csv::Writer::from_writer(vec![]);
    writer.write_record(T::schema().header())?;
    for row in rows {
        writer.write_record(row.cells())?;
    }
    Ok(writer.into_inner()?)
}
