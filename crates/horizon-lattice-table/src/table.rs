//! The tabular result type.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// One row of a table: column name to rendered cell text.
///
/// Rows are sparse. A column missing from a row is an empty cell.
pub type RowRecord = IndexMap<String, String>;

/// A display-ready table produced from an arbitrary JSON value.
///
/// Columns are kept in the order they were first observed, so identical
/// input always yields identical column order. Every key of every row is
/// present in [`columns`](Self::columns).
///
/// Serializes as `{"rows": [...], "columns": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TabularResult {
    rows: Vec<RowRecord>,
    columns: IndexSet<String>,
}

impl TabularResult {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row, registering its column names.
    pub(crate) fn push_row(&mut self, cells: impl IntoIterator<Item = (String, String)>) {
        let mut row = RowRecord::new();
        for (column, text) in cells {
            if !self.columns.contains(&column) {
                self.columns.insert(column.clone());
            }
            row.insert(column, text);
        }
        self.rows.push(row);
    }

    /// The rows, in source order.
    pub fn rows(&self) -> &[RowRecord] {
        &self.rows
    }

    /// The observed column names, in first-seen order.
    pub fn columns(&self) -> &IndexSet<String> {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The text of a cell, or an empty string for a missing row or column.
    pub fn cell(&self, row: usize, column: &str) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Split into rows and columns.
    pub fn into_parts(self) -> (Vec<RowRecord>, IndexSet<String>) {
        (self.rows, self.columns)
    }
}
