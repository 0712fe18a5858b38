//! Sidebar navigation state: which section has focus and where each
//! section's cursor sits.

/// Keyboard focus. The first three are sidebar sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Columns,
    ColorBy,
    GroupBy,
    Cards,
}

impl Focus {
    const ORDER: [Focus; 4] = [Focus::Columns, Focus::ColorBy, Focus::GroupBy, Focus::Cards];

    pub fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn is_sidebar(self) -> bool {
        self != Focus::Cards
    }
}

/// Cursor positions. The color-by and group-by lists have a leading "None"
/// entry, so their cursors run over `columns + 1` options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidebarState {
    pub column_cursor: usize,
    pub color_cursor: usize,
    pub group_cursor: usize,
}

impl SidebarState {
    /// Move the cursor of the focused section by `delta`, clamped to its list.
    pub fn move_cursor(&mut self, focus: Focus, delta: isize, num_columns: usize) {
        let (cursor, len) = match focus {
            Focus::Columns => (&mut self.column_cursor, num_columns),
            Focus::ColorBy => (&mut self.color_cursor, num_columns + 1),
            Focus::GroupBy => (&mut self.group_cursor, num_columns + 1),
            Focus::Cards => return,
        };
        if len == 0 {
            *cursor = 0;
            return;
        }
        *cursor = cursor.saturating_add_signed(delta).min(len - 1);
    }

    /// Column under the Columns cursor.
    pub fn highlighted_column<'a>(&self, columns: &'a [String]) -> Option<&'a str> {
        columns.get(self.column_cursor).map(String::as_str)
    }

    /// Column under the cursor of the focused section. The cards area uses the
    /// columns cursor; a "None" option has no column.
    pub fn focused_column<'a>(&self, focus: Focus, columns: &'a [String]) -> Option<&'a str> {
        match focus {
            Focus::Columns | Focus::Cards => self.highlighted_column(columns),
            Focus::ColorBy => Self::option_column(columns, self.color_cursor),
            Focus::GroupBy => Self::option_column(columns, self.group_cursor),
        }
    }

    /// Column chosen by an option cursor (`0` is "None").
    pub fn option_column<'a>(columns: &'a [String], cursor: usize) -> Option<&'a str> {
        cursor
            .checked_sub(1)
            .and_then(|i| columns.get(i))
            .map(String::as_str)
    }
}
