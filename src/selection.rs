//! User choices over the current dataset: visible columns, group-by,
//! color-by and filters.

use crate::dataset::Dataset;
use crate::filter::Filters;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    visible: Vec<String>,
    group_by: Option<String>,
    color_by: Option<String>,
    filters: Filters,
}

impl SelectionState {
    /// Fresh selection for `dataset`: every column visible, nothing else set.
    pub fn for_dataset(dataset: &Dataset) -> Self {
        Self {
            visible: dataset.columns().to_vec(),
            ..Self::default()
        }
    }

    /// Visible columns, in dataset column order.
    pub fn visible_columns(&self) -> &[String] {
        &self.visible
    }

    pub fn is_visible(&self, column: &str) -> bool {
        self.visible.iter().any(|c| c == column)
    }

    pub fn group_by(&self) -> Option<&str> {
        self.group_by.as_deref()
    }

    pub fn color_by(&self) -> Option<&str> {
        self.color_by.as_deref()
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Show or hide `column` on cards. A column shown again goes back to its
    /// dataset position. Returns false if the column is not in the dataset.
    pub fn toggle_column_visible(&mut self, dataset: &Dataset, column: &str) -> bool {
        if !dataset.has_column(column) {
            return false;
        }
        if self.is_visible(column) {
            self.visible.retain(|c| c != column);
        } else {
            self.visible = dataset
                .columns()
                .iter()
                .filter(|c| c.as_str() == column || self.is_visible(c))
                .cloned()
                .collect();
        }
        true
    }

    /// Returns true if the group-by column changed.
    pub fn set_group_by(&mut self, dataset: &Dataset, column: Option<&str>) -> bool {
        set_column_choice(&mut self.group_by, dataset, column)
    }

    /// Returns true if the color-by column changed.
    pub fn set_color_by(&mut self, dataset: &Dataset, column: Option<&str>) -> bool {
        set_column_choice(&mut self.color_by, dataset, column)
    }

    /// Set or clear the substring filter on `column`. Returns true if the
    /// active filters changed.
    pub fn set_filter(&mut self, dataset: &Dataset, column: &str, substring: Option<&str>) -> bool {
        if !dataset.has_column(column) {
            return false;
        }
        self.filters.set(column, substring)
    }

    pub fn clear_filters(&mut self) -> bool {
        self.filters.clear()
    }
}

fn set_column_choice(slot: &mut Option<String>, dataset: &Dataset, column: Option<&str>) -> bool {
    if let Some(c) = column {
        if !dataset.has_column(c) {
            return false;
        }
    }
    if slot.as_deref() == column {
        return false;
    }
    *slot = column.map(str::to_string);
    true
}
