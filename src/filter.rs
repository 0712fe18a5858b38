//! Per-column substring filters.

use crate::dataset::Row;
use std::collections::BTreeMap;

/// Active filters keyed by column. A column without an entry is unconstrained.
///
/// Empty substrings are never stored: setting one clears the column's filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Filters {
    by_column: BTreeMap<String, String>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the filter on `column`. Returns true if anything changed.
    pub fn set(&mut self, column: &str, substring: Option<&str>) -> bool {
        match substring.filter(|s| !s.is_empty()) {
            Some(s) => {
                let previous = self.by_column.insert(column.to_string(), s.to_string());
                previous.as_deref() != Some(s)
            }
            None => self.by_column.remove(column).is_some(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.by_column.get(column).map(String::as_str)
    }

    pub fn clear(&mut self) -> bool {
        let had_any = !self.by_column.is_empty();
        self.by_column.clear();
        had_any
    }

    pub fn is_empty(&self) -> bool {
        self.by_column.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_column.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_column.iter().map(|(c, s)| (c.as_str(), s.as_str()))
    }

    /// Whether `row` passes every filter. Matching is case-insensitive; a
    /// missing cell never matches.
    pub fn matches(&self, row: &Row) -> bool {
        self.by_column.iter().all(|(column, needle)| {
            row.get(column)
                .map(|value| value.to_lowercase().contains(&needle.to_lowercase()))
                .unwrap_or(false)
        })
    }
}

/// Keep the rows that pass every filter, in their original order.
pub fn apply_filters<'a, I>(rows: I, filters: &Filters) -> Vec<&'a Row>
where
    I: IntoIterator<Item = &'a Row>,
{
    rows.into_iter().filter(|row| filters.matches(row)).collect()
}
