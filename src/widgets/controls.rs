use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Paragraph, Widget},
};

const CONTROLS: [(&str, &str); 6] = [
    ("Tab", "Focus"),
    ("␣", "Select"),
    ("/", "Filter"),
    ("c", "Clear"),
    ("o", "Open"),
    ("q", "Quit"),
];

pub struct Controls {
    pub shown: usize,
    pub total: usize,
    pub dimmed: bool,
    bg: Color,
    key: Color,
    text: Color,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            shown: 0,
            total: 0,
            dimmed: false,
            bg: Color::DarkGray,
            key: Color::Cyan,
            text: Color::White,
        }
    }
}

impl Controls {
    pub fn with_row_counts(shown: usize, total: usize) -> Self {
        Self {
            shown,
            total,
            ..Self::default()
        }
    }

    pub fn with_colors(mut self, bg: Color, key: Color, text: Color) -> Self {
        self.bg = bg;
        self.key = key;
        self.text = text;
        self
    }

    pub fn with_dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }

    fn row_label(&self) -> String {
        format!("Rows: {}/{}", self.shown, self.total)
    }
}

impl Widget for &Controls {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let row_label = self.row_label();
        let mut constraints = CONTROLS.iter().fold(vec![], |mut acc, (key, action)| {
            acc.push(Constraint::Length(key.chars().count() as u16 + 2));
            acc.push(Constraint::Length(action.chars().count() as u16 + 1));
            acc
        });
        constraints.push(Constraint::Fill(1));
        constraints.push(Constraint::Length(row_label.chars().count() as u16 + 1));

        let layout = Layout::new(Direction::Horizontal, constraints).split(area);

        let key_color = if self.dimmed { Color::DarkGray } else { self.key };
        let text_color = if self.dimmed { Color::DarkGray } else { self.text };
        let base_style = Style::default().bg(self.bg);

        for (i, (key, action)) in CONTROLS.iter().enumerate() {
            let j = i * 2;
            Paragraph::new(*key)
                .style(Style::default().fg(key_color).bold())
                .centered()
                .render(layout[j], buf);
            Paragraph::new(*action)
                .style(base_style.fg(text_color))
                .render(layout[j + 1], buf);
        }

        let fill_idx = CONTROLS.len() * 2;
        Paragraph::new("")
            .style(base_style)
            .render(layout[fill_idx], buf);
        Paragraph::new(row_label)
            .style(base_style.fg(text_color))
            .right_aligned()
            .render(layout[fill_idx + 1], buf);
    }
}
