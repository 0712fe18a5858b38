//! In-memory table model: ordered columns plus rows of opaque string cells.

use std::collections::HashMap;

/// One parsed record: the `(column, value)` pairs the CSV reader produced for a
/// line, in header order. Fields the line did not have are simply absent.
pub type Record = Vec<(String, String)>;

/// A single data row. Cells are looked up by column name; a column the row
/// has no value for reads as missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    index: usize,
    values: HashMap<String, String>,
}

impl Row {
    pub fn new(index: usize, values: HashMap<String, String>) -> Self {
        Self { index, values }
    }

    /// Position of this row in the file's data rows (0-based).
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Cell value with missing treated as empty.
    pub fn value_or_empty(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }
}

/// The full table from the most recently opened file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a dataset from parsed records.
    ///
    /// Columns are taken from the first record only, in its field order.
    /// Later records carrying extra fields keep them, but they never become
    /// columns and no view looks at them.
    pub fn from_records(records: Vec<Record>) -> Self {
        let columns: Vec<String> = match records.first() {
            Some(first) => {
                let mut columns: Vec<String> = Vec::with_capacity(first.len());
                for (name, _) in first {
                    if !columns.contains(name) {
                        columns.push(name.clone());
                    }
                }
                columns
            }
            None => return Self::empty(),
        };

        let rows = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| Row::new(index, record.into_iter().collect()))
            .collect();

        Self { columns, rows }
    }

    /// Build a dataset whose columns come from the file header.
    ///
    /// Used when records may omit empty cells, so the first record cannot be
    /// trusted to name every column. No records still means an empty dataset.
    pub fn with_columns(columns: Vec<String>, records: Vec<Record>) -> Self {
        if records.is_empty() {
            return Self::empty();
        }
        let mut unique: Vec<String> = Vec::with_capacity(columns.len());
        for name in columns {
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| Row::new(index, record.into_iter().collect()))
            .collect();
        Self {
            columns: unique,
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}
