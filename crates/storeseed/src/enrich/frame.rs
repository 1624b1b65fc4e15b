//! Minimal named-column table used by the enrichment join.

use crate::error::{Result, SeedError};
use std::collections::HashMap;

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Missing value (no join match, or never set).
    Null,
}

impl Cell {
    /// Integer view; floats with no fractional part are accepted.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Int(v) => Some(*v),
            Cell::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }

    /// Floating point view; integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(v) => Some(*v as f64),
            Cell::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Text view.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Join key for this cell; only integers and text can be keys.
    fn key(&self) -> Option<String> {
        match self {
            Cell::Int(v) => Some(v.to_string()),
            Cell::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

/// Row-major table with an ordered, possibly duplicated, column list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Frame {
    /// Create an empty frame with the given columns.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; its width must match the column count.
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(SeedError::generation(format!(
                "row has {} cells, frame has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Append a row the caller built to the frame's width.
    pub(crate) fn push_row_unchecked(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Column names in positional order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in insertion order.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Positions of every column carrying a value for `field`: the exact
    /// name, or the name with a numeric `.N` suffix as produced by tools
    /// that de-duplicate headers on read.
    pub fn candidate_columns(&self, field: &str) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, name)| is_candidate(name, field))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Position of the rightmost candidate column for `field`.
    pub fn last_candidate(&self, field: &str) -> Option<usize> {
        self.columns.iter().rposition(|name| is_candidate(name, field))
    }

    /// Rename every column named exactly `from`.
    pub fn rename(&mut self, from: &str, to: &str) {
        for name in self.columns.iter_mut().filter(|name| name.as_str() == from) {
            *name = to.to_string();
        }
    }

    /// Left join `right` onto this frame on the `key` column.
    ///
    /// Output columns are this frame's columns followed by every `right`
    /// column except the key, names kept as-is (duplicates included). Each
    /// left row yields exactly one output row; a key without a match in
    /// `right` gets `Null` in the joined columns. If `right` repeats a key,
    /// its last row wins.
    pub fn left_join(&self, right: &Frame, key: &str) -> Result<Frame> {
        let left_key = self
            .last_candidate(key)
            .ok_or_else(|| SeedError::generation(format!("left frame has no '{}' column", key)))?;
        let right_key = right
            .last_candidate(key)
            .ok_or_else(|| SeedError::generation(format!("right frame has no '{}' column", key)))?;

        let right_cols: Vec<usize> = (0..right.columns.len())
            .filter(|&idx| idx != right_key)
            .collect();

        let mut lookup: HashMap<String, usize> = HashMap::with_capacity(right.rows.len());
        for (idx, row) in right.rows.iter().enumerate() {
            if let Some(k) = row[right_key].key() {
                lookup.insert(k, idx);
            }
        }

        let mut columns = self.columns.clone();
        columns.extend(right_cols.iter().map(|&idx| right.columns[idx].clone()));

        let mut joined = Frame {
            columns,
            rows: Vec::with_capacity(self.rows.len()),
        };

        for row in &self.rows {
            let matched = row[left_key]
                .key()
                .and_then(|k| lookup.get(&k))
                .map(|&idx| &right.rows[idx]);

            let mut out = row.clone();
            match matched {
                Some(right_row) => out.extend(right_cols.iter().map(|&idx| right_row[idx].clone())),
                None => out.extend(right_cols.iter().map(|_| Cell::Null)),
            }
            joined.rows.push(out);
        }

        Ok(joined)
    }
}

fn is_candidate(name: &str, field: &str) -> bool {
    match name.strip_prefix(field) {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix('.')
            .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())),
        None => false,
    }
}
