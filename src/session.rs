//! The current dataset together with everything derived from it.
//!
//! A [`Session`] owns the [`Dataset`], the [`SelectionState`] and the
//! [`ColorAssignment`]. Replacing the dataset resets the other two in the same
//! call, so no caller can observe a new table with stale selections or colors.

use crate::color::ColorAssignment;
use crate::dataset::{Dataset, Row};
use crate::filter::{apply_filters, Filters};
use crate::grouping::group_rows;
use crate::selection::SelectionState;
use ratatui::style::Color;

/// Inputs the filtered and grouped row layout depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewKey {
    version: u64,
    filters: Filters,
    group_by: Option<String>,
}

/// Memoized layout: bucket keys with the indices of their rows.
#[derive(Debug, Clone)]
struct DerivedLayout {
    key: ViewKey,
    buckets: Vec<(String, Vec<usize>)>,
    filtered: usize,
}

/// One card: a row plus its background color when a color-by column is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card<'a> {
    pub row: &'a Row,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardBucket<'a> {
    pub key: &'a str,
    pub cards: Vec<Card<'a>>,
}

/// Filtered, grouped and colored rows ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView<'a> {
    pub buckets: Vec<CardBucket<'a>>,
    pub visible_columns: &'a [String],
    pub color_by: Option<&'a str>,
    pub filtered_rows: usize,
    pub total_rows: usize,
}

impl CardView<'_> {
    pub fn is_empty(&self) -> bool {
        self.filtered_rows == 0
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    dataset: Dataset,
    selection: SelectionState,
    colors: ColorAssignment,
    version: u64,
    layout: Option<DerivedLayout>,
}

impl Session {
    pub fn new(colors: ColorAssignment) -> Self {
        Self {
            dataset: Dataset::empty(),
            selection: SelectionState::default(),
            colors,
            version: 0,
            layout: None,
        }
    }

    /// Swap in a newly loaded dataset, resetting selections, filters and
    /// color assignments.
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        self.selection = SelectionState::for_dataset(&dataset);
        self.dataset = dataset;
        self.colors.reset();
        self.version += 1;
        self.layout = None;
        log::debug!(
            "dataset replaced (version {}): {} columns, {} rows",
            self.version,
            self.dataset.columns().len(),
            self.dataset.num_rows()
        );
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn colors(&self) -> &ColorAssignment {
        &self.colors
    }

    /// Incremented on every dataset replacement.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn toggle_column_visible(&mut self, column: &str) -> bool {
        self.selection.toggle_column_visible(&self.dataset, column)
    }

    pub fn set_group_by(&mut self, column: Option<&str>) -> bool {
        self.selection.set_group_by(&self.dataset, column)
    }

    pub fn set_color_by(&mut self, column: Option<&str>) -> bool {
        self.selection.set_color_by(&self.dataset, column)
    }

    pub fn set_filter(&mut self, column: &str, substring: Option<&str>) -> bool {
        self.selection.set_filter(&self.dataset, column, substring)
    }

    pub fn clear_filters(&mut self) -> bool {
        self.selection.clear_filters()
    }

    /// Color for `value` under the current assignment, assigning on first use.
    pub fn color_of(&mut self, value: &str) -> Color {
        self.colors.color_of(value)
    }

    pub fn total_count(&self) -> usize {
        self.dataset.num_rows()
    }

    /// Rows passing the current filters.
    pub fn filtered_count(&mut self) -> usize {
        self.ensure_layout();
        self.layout.as_ref().map(|l| l.filtered).unwrap_or(0)
    }

    /// Derive the card view. Colors are assigned in view order (bucket by
    /// bucket, card by card), so the first value on screen gets the first
    /// palette entry.
    pub fn view(&mut self) -> CardView<'_> {
        self.ensure_layout();
        let Self {
            dataset,
            selection,
            colors,
            layout,
            ..
        } = self;
        let Some(layout) = layout.as_ref() else {
            return CardView {
                buckets: Vec::new(),
                visible_columns: selection.visible_columns(),
                color_by: selection.color_by(),
                filtered_rows: 0,
                total_rows: dataset.num_rows(),
            };
        };

        let rows = dataset.rows();
        let color_by = selection.color_by();
        let buckets = layout
            .buckets
            .iter()
            .map(|(key, indices)| CardBucket {
                key: key.as_str(),
                cards: indices
                    .iter()
                    .map(|&i| {
                        let row = &rows[i];
                        let color = color_by.map(|c| colors.color_of(row.value_or_empty(c)));
                        Card { row, color }
                    })
                    .collect(),
            })
            .collect();

        CardView {
            buckets,
            visible_columns: selection.visible_columns(),
            color_by,
            filtered_rows: layout.filtered,
            total_rows: dataset.num_rows(),
        }
    }

    fn ensure_layout(&mut self) {
        let key = ViewKey {
            version: self.version,
            filters: self.selection.filters().clone(),
            group_by: self.selection.group_by().map(str::to_string),
        };
        if self.layout.as_ref().is_some_and(|l| l.key == key) {
            return;
        }
        let filtered = apply_filters(self.dataset.rows(), self.selection.filters());
        let buckets: Vec<(String, Vec<usize>)> = group_rows(&filtered, self.selection.group_by())
            .into_iter()
            .map(|b| (b.key, b.rows.iter().map(|r| r.index()).collect()))
            .collect();
        log::debug!(
            "derived view: {} of {} rows, {} filters, group_by={:?}",
            filtered.len(),
            self.dataset.num_rows(),
            key.filters.len(),
            key.group_by
        );
        self.layout = Some(DerivedLayout {
            filtered: filtered.len(),
            key,
            buckets,
        });
    }
}
