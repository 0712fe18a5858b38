//! Left-hand sidebar: column checkboxes, color-by and group-by choices.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, StatefulWidget, Widget},
};

use crate::selection::SelectionState;
use crate::sidebar::{Focus, SidebarState};

#[derive(Debug, Clone, Copy)]
pub struct SidebarColors {
    pub border: Color,
    pub focus: Color,
    pub text: Color,
    pub filter_marker: Color,
}

pub struct Sidebar<'a> {
    pub columns: &'a [String],
    pub selection: &'a SelectionState,
    pub state: &'a SidebarState,
    pub focus: Focus,
    pub colors: SidebarColors,
}

impl<'a> Sidebar<'a> {
    fn block(&self, title: &'a str, section: Focus) -> Block<'a> {
        let color = if self.focus == section {
            self.colors.focus
        } else {
            self.colors.border
        };
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .title(title)
    }

    fn render_list(
        &self,
        items: Vec<ListItem<'a>>,
        cursor: usize,
        section: Focus,
        block: Block<'a>,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let mut list = List::new(items)
            .block(block)
            .style(Style::default().fg(self.colors.text));
        if self.focus == section {
            list = list.highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        }
        let mut state = ListState::default().with_selected(Some(cursor));
        StatefulWidget::render(list, area, buf, &mut state);
    }

    fn column_items(&self) -> Vec<ListItem<'a>> {
        self.columns
            .iter()
            .map(|col| {
                let mark = if self.selection.is_visible(col) {
                    "[x] "
                } else {
                    "[ ] "
                };
                let mut spans = vec![Span::raw(mark), Span::raw(col.as_str())];
                if let Some(f) = self.selection.filters().get(col) {
                    spans.push(Span::styled(
                        format!(" ~{}", f),
                        Style::default().fg(self.colors.filter_marker),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect()
    }

    fn option_items(&self, chosen: Option<&str>) -> Vec<ListItem<'a>> {
        let marker = |selected: bool| if selected { "● " } else { "○ " };
        std::iter::once(ListItem::new(format!("{}None", marker(chosen.is_none()))))
            .chain(self.columns.iter().map(|col| {
                ListItem::new(format!("{}{}", marker(chosen == Some(col.as_str())), col))
            }))
            .collect()
    }
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Option lists get at most a third of the height each.
        let option_height = (self.columns.len() as u16 + 3).min(area.height / 3).max(3);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(option_height),
                Constraint::Length(option_height),
            ])
            .split(area);

        self.render_list(
            self.column_items(),
            self.state.column_cursor,
            Focus::Columns,
            self.block("Columns", Focus::Columns),
            chunks[0],
            buf,
        );
        self.render_list(
            self.option_items(self.selection.color_by()),
            self.state.color_cursor,
            Focus::ColorBy,
            self.block("Color By", Focus::ColorBy),
            chunks[1],
            buf,
        );
        self.render_list(
            self.option_items(self.selection.group_by()),
            self.state.group_cursor,
            Focus::GroupBy,
            self.block("Group By", Focus::GroupBy),
            chunks[2],
            buf,
        );
    }
}
