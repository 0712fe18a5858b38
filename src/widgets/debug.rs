use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Paragraph, Widget},
};

/// Counters shown on the `--debug` line.
#[derive(Default)]
pub struct DebugState {
    pub enabled: bool,
    pub num_events: usize,
    pub num_frames: usize,
    pub num_key_events: usize,
    pub last_key_event_name: String,
    pub last_action: String,
}

impl DebugState {
    pub fn on_key(&mut self, event: &KeyEvent) {
        self.num_key_events += 1;
        self.last_key_event_name = match event.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            code => format!("{:?}", code),
        };
    }

    pub fn record_action(&mut self, action: impl Into<String>) {
        self.last_action = action.into();
    }

    fn line(&self) -> String {
        format!(
            "events: {} | frames: {} | keys: {} | last key: {} | last action: {}",
            self.num_events,
            self.num_frames,
            self.num_key_events,
            self.last_key_event_name,
            self.last_action
        )
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line())
            .style(Style::default().fg(Color::DarkGray))
            .render(area, buf);
    }
}
