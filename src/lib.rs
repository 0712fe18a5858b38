use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

pub mod color;
pub mod config;
pub mod dataset;
pub mod error_display;
pub mod filter;
pub mod grouping;
pub mod loader;
pub mod selection;
pub mod session;
pub mod sidebar;
pub mod widgets;

pub use config::{
    rgb_to_256_color, rgb_to_basic_ansi, AppConfig, ColorParser, ConfigManager, Theme,
};
pub use csvcards_cli::{Args, ColorPolicy, CompressionFormat};
pub use dataset::Dataset;
pub use session::Session;

use color::ColorAssignment;
use error_display::user_message_from_report;
use sidebar::{Focus, SidebarState};
use widgets::cards::{CardGrid, CardGridColors};
use widgets::controls::Controls;
use widgets::debug::DebugState;
use widgets::sidebar::{Sidebar, SidebarColors};

/// Application name used for the config directory and other app-specific paths
pub const APP_NAME: &str = "csvcards";

/// Width of the sidebar column, borders included.
const SIDEBAR_WIDTH: u16 = 30;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OpenOptions {
    pub delimiter: Option<u8>,
    pub has_header: Option<bool>,
    pub skip_rows: Option<usize>,
    pub compression: Option<CompressionFormat>,
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = Some(skip_rows);
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_has_header(mut self, has_header: bool) -> Self {
        self.has_header = Some(has_header);
        self
    }

    pub fn with_compression(mut self, compression: CompressionFormat) -> Self {
        self.compression = Some(compression);
        self
    }

    /// Create OpenOptions from CLI args and config, with CLI args taking precedence
    pub fn from_args_and_config(args: &Args, config: &AppConfig) -> Self {
        let mut opts = OpenOptions::new();

        opts.delimiter = args.delimiter.or(config.file_loading.delimiter);
        opts.skip_rows = args.skip_rows.or(config.file_loading.skip_rows);

        // CLI no_header flag overrides config
        opts.has_header = if let Some(no_header) = args.no_header {
            Some(!no_header)
        } else {
            config.file_loading.has_header
        };

        opts.compression = args.compression.or_else(|| {
            config
                .file_loading
                .compression
                .as_deref()
                .and_then(CompressionFormat::from_name)
        });

        opts
    }
}

impl From<&Args> for OpenOptions {
    fn from(args: &Args) -> Self {
        let config = AppConfig::default();
        Self::from_args_and_config(args, &config)
    }
}

pub enum AppEvent {
    Key(KeyEvent),
    Open(PathBuf, OpenOptions),
    DoLoad(PathBuf, OpenOptions), // Performs the load after the loading indicator has rendered
    Exit,
    ToggleColumn(String),
    GroupBy(Option<String>),
    ColorBy(Option<String>),
    Filter(String, Option<String>), // Column, substring (None clears)
    ClearFilters,
    Resize(u16, u16), // resized (width, height)
}

#[derive(Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputType {
    Filter(String),
    OpenPath,
}

#[derive(Default)]
pub struct ErrorModal {
    pub active: bool,
    pub message: String,
}

impl ErrorModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: String) {
        self.active = true;
        self.message = message;
    }

    pub fn hide(&mut self) {
        self.active = false;
        self.message.clear();
    }
}

#[derive(Clone, Debug, Default)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading {
        file_path: PathBuf,
        file_size: u64,
        current_phase: String,
    },
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading { .. })
    }
}

/// Byte count in the largest binary unit that keeps it at or above 1.
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}

pub struct App {
    session: Session,
    path: Option<PathBuf>,
    events: Sender<AppEvent>,
    focus: Focus,
    sidebar: SidebarState,
    debug: DebugState,
    input: String,
    input_cursor: usize, // Cursor position in input string, in chars
    pub input_mode: InputMode,
    input_type: Option<InputType>,
    error_modal: ErrorModal,
    loading_state: LoadingState,
    theme: Theme,
    color_parser: ColorParser,
    card_width: u16,
    lane_offset: usize,
    card_offset: usize,
    open_options: OpenOptions,
}

impl App {
    pub fn send_event(&mut self, event: AppEvent) -> Result<()> {
        self.events.send(event)?;
        Ok(())
    }

    fn render_loading_panel(loading_state: &LoadingState, area: Rect, buf: &mut Buffer) {
        if let LoadingState::Loading {
            file_path,
            file_size,
            current_phase,
        } = loading_state
        {
            let panel_width = (area.width as f64 * 0.5) as u16;
            let panel_height = 3u16;

            let center_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Fill(1),
                    Constraint::Length(panel_height),
                    Constraint::Fill(1),
                ])
                .split(area);

            let panel_area = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Fill(1),
                    Constraint::Length(panel_width),
                    Constraint::Fill(1),
                ])
                .split(center_layout[1])[1];

            let title = file_path
                .file_name()
                .map(|n| format!("Loading {}", n.to_string_lossy()))
                .unwrap_or_else(|| "Loading".to_string());
            Clear.render(panel_area, buf);
            Paragraph::new(format!("{} ({})", current_phase, format_size(*file_size)))
                .centered()
                .block(Block::default().borders(Borders::ALL).title(title))
                .render(panel_area, buf);
        }
    }

    pub fn new(events: Sender<AppEvent>) -> App {
        let theme = Theme::from_config(&AppConfig::default().theme).unwrap_or_else(|e| {
            log::warn!("failed to create default theme: {}", e);
            Theme {
                colors: std::collections::HashMap::new(),
            }
        });

        Self::new_with_config(events, theme, AppConfig::default())
    }

    pub fn new_with_config(events: Sender<AppEvent>, theme: Theme, app_config: AppConfig) -> App {
        let colors = app_config.cards.color_assignment().unwrap_or_else(|e| {
            log::warn!("invalid [cards] config, falling back to hashed colors: {}", e);
            ColorAssignment::new(ColorPolicy::Hash, Vec::new())
        });

        let mut app = App {
            session: Session::new(colors),
            path: None,
            events,
            focus: Focus::default(),
            sidebar: SidebarState::default(),
            debug: DebugState::default(),
            input: String::new(),
            input_cursor: 0,
            input_mode: InputMode::Normal,
            input_type: None,
            error_modal: ErrorModal::new(),
            loading_state: LoadingState::Idle,
            theme,
            color_parser: ColorParser::new(),
            card_width: app_config.cards.card_width,
            lane_offset: 0,
            card_offset: 0,
            open_options: OpenOptions::new(),
        };
        if app_config.debug.enabled {
            app.enable_debug();
        }
        app
    }

    pub fn enable_debug(&mut self) {
        self.debug.enabled = true;
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn is_loading(&self) -> bool {
        self.loading_state.is_loading()
    }

    /// Message of the visible error panel, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error_modal
            .active
            .then_some(self.error_modal.message.as_str())
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Get a color from the theme by name
    fn color(&self, name: &str) -> Color {
        self.theme.get(name)
    }

    fn load(&mut self, path: &Path, options: &OpenOptions) -> Result<()> {
        let dataset = loader::load_dataset(path, options)?;
        self.session.replace_dataset(dataset);
        Ok(())
    }

    /// Put the view back at its starting position after the dataset changed.
    fn reset_view(&mut self) {
        self.sidebar = SidebarState::default();
        self.focus = Focus::default();
        self.lane_offset = 0;
        self.card_offset = 0;
    }

    /// Number of lanes and the length of the longest lane in the current view.
    fn grid_extent(&mut self) -> (usize, usize) {
        let view = self.session.view();
        let longest = view.buckets.iter().map(|b| b.cards.len()).max().unwrap_or(0);
        (view.buckets.len(), longest)
    }

    fn start_input(&mut self, input_type: InputType, initial: String) {
        self.input_cursor = initial.chars().count();
        self.input = initial;
        self.input_type = Some(input_type);
        self.input_mode = InputMode::Editing;
    }

    fn stop_input(&mut self) {
        self.input.clear();
        self.input_cursor = 0;
        self.input_type = None;
        self.input_mode = InputMode::Normal;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    fn input_key(&mut self, event: &KeyEvent) -> Option<AppEvent> {
        match event.code {
            KeyCode::Esc => {
                self.stop_input();
                None
            }
            KeyCode::Enter => {
                let value = std::mem::take(&mut self.input);
                let input_type = self.input_type.take();
                self.stop_input();
                match input_type? {
                    // Filter text is kept as typed; only paths are trimmed
                    InputType::Filter(column) => {
                        let substring = (!value.is_empty()).then_some(value);
                        Some(AppEvent::Filter(column, substring))
                    }
                    InputType::OpenPath if value.trim().is_empty() => None,
                    InputType::OpenPath => {
                        // Compression forced on the command line applied to the first file only
                        let mut options = self.open_options.clone();
                        options.compression = None;
                        Some(AppEvent::Open(PathBuf::from(value.trim()), options))
                    }
                }
            }
            KeyCode::Char(c) if !event.modifiers.contains(KeyModifiers::CONTROL) => {
                let idx = self.byte_index(self.input_cursor);
                self.input.insert(idx, c);
                self.input_cursor += 1;
                None
            }
            KeyCode::Backspace if self.input_cursor > 0 => {
                self.input_cursor -= 1;
                let idx = self.byte_index(self.input_cursor);
                self.input.remove(idx);
                None
            }
            KeyCode::Delete if self.input_cursor < self.input.chars().count() => {
                let idx = self.byte_index(self.input_cursor);
                self.input.remove(idx);
                None
            }
            KeyCode::Left => {
                self.input_cursor = self.input_cursor.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                self.input_cursor = (self.input_cursor + 1).min(self.input.chars().count());
                None
            }
            KeyCode::Home => {
                self.input_cursor = 0;
                None
            }
            KeyCode::End => {
                self.input_cursor = self.input.chars().count();
                None
            }
            _ => None,
        }
    }

    fn key(&mut self, event: &KeyEvent) -> Option<AppEvent> {
        self.debug.on_key(event);

        // Error panel has highest priority
        if self.error_modal.active {
            if matches!(event.code, KeyCode::Esc | KeyCode::Enter) {
                self.error_modal.hide();
            }
            return None;
        }

        if self.input_mode == InputMode::Editing {
            return self.input_key(event);
        }

        let num_columns = self.session.dataset().columns().len();
        match event.code {
            KeyCode::Char('q') => Some(AppEvent::Exit),
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(AppEvent::Exit)
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.focus.is_sidebar() {
                    self.sidebar.move_cursor(self.focus, -1, num_columns);
                } else {
                    self.card_offset = self.card_offset.saturating_sub(1);
                }
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.focus.is_sidebar() {
                    self.sidebar.move_cursor(self.focus, 1, num_columns);
                } else {
                    let (_, longest) = self.grid_extent();
                    self.card_offset = (self.card_offset + 1).min(longest.saturating_sub(1));
                }
                None
            }
            KeyCode::Left | KeyCode::Char('h') if self.focus == Focus::Cards => {
                self.lane_offset = self.lane_offset.saturating_sub(1);
                None
            }
            KeyCode::Right | KeyCode::Char('l') if self.focus == Focus::Cards => {
                let (lanes, _) = self.grid_extent();
                self.lane_offset = (self.lane_offset + 1).min(lanes.saturating_sub(1));
                None
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.activate(),
            KeyCode::Char('/') => {
                let column = self
                    .sidebar
                    .focused_column(self.focus, self.session.dataset().columns())?
                    .to_string();
                let current = self
                    .session
                    .selection()
                    .filters()
                    .get(&column)
                    .unwrap_or_default()
                    .to_string();
                self.start_input(InputType::Filter(column), current);
                None
            }
            KeyCode::Char('c') => Some(AppEvent::ClearFilters),
            KeyCode::Char('o') => {
                let current = self
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                self.start_input(InputType::OpenPath, current);
                None
            }
            _ => None,
        }
    }

    /// Space/Enter on the focused sidebar section.
    fn activate(&mut self) -> Option<AppEvent> {
        let columns = self.session.dataset().columns();
        match self.focus {
            Focus::Columns => self
                .sidebar
                .highlighted_column(columns)
                .map(|c| AppEvent::ToggleColumn(c.to_string())),
            Focus::ColorBy => Some(AppEvent::ColorBy(
                SidebarState::option_column(columns, self.sidebar.color_cursor)
                    .map(str::to_string),
            )),
            Focus::GroupBy => Some(AppEvent::GroupBy(
                SidebarState::option_column(columns, self.sidebar.group_cursor)
                    .map(str::to_string),
            )),
            Focus::Cards => None,
        }
    }

    pub fn event(&mut self, event: &AppEvent) -> Option<AppEvent> {
        self.debug.num_events += 1;
        match event {
            AppEvent::Key(key) => self.key(key),
            AppEvent::Open(path, options) => {
                let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
                log::info!("opening {} ({} bytes)", path.display(), file_size);
                if self.path.is_none() {
                    self.open_options = options.clone();
                }
                self.loading_state = LoadingState::Loading {
                    file_path: path.clone(),
                    file_size,
                    current_phase: "Reading file".to_string(),
                };

                // Load after the loading indicator has rendered
                Some(AppEvent::DoLoad(path.clone(), options.clone()))
            }
            AppEvent::DoLoad(path, options) => {
                if let Err(e) = self.load(path, options) {
                    log::error!("failed to load {}: {:?}", path.display(), e);
                    self.session.replace_dataset(Dataset::empty());
                    self.error_modal
                        .show(user_message_from_report(&e, Some(path.as_path())));
                }
                self.path = Some(path.clone());
                self.loading_state = LoadingState::Idle;
                self.reset_view();
                self.debug
                    .record_action(format!("loaded {}", path.display()));
                None
            }
            AppEvent::ToggleColumn(column) => {
                if self.session.toggle_column_visible(column) {
                    self.debug.record_action(format!("toggle {}", column));
                }
                None
            }
            AppEvent::GroupBy(column) => {
                if self.session.set_group_by(column.as_deref()) {
                    self.lane_offset = 0;
                    self.card_offset = 0;
                    self.debug
                        .record_action(format!("group by {}", column.as_deref().unwrap_or("none")));
                }
                None
            }
            AppEvent::ColorBy(column) => {
                if self.session.set_color_by(column.as_deref()) {
                    self.debug
                        .record_action(format!("color by {}", column.as_deref().unwrap_or("none")));
                }
                None
            }
            AppEvent::Filter(column, substring) => {
                if self.session.set_filter(column, substring.as_deref()) {
                    self.card_offset = 0;
                    self.lane_offset = 0;
                    self.debug.record_action(format!("filter {}", column));
                }
                None
            }
            AppEvent::ClearFilters => {
                if self.session.clear_filters() {
                    self.card_offset = 0;
                    self.lane_offset = 0;
                    self.debug.record_action("clear filters");
                }
                None
            }
            AppEvent::Resize(_cols, _rows) => None,
            _ => None,
        }
    }

    fn render_input(&self, area: Rect, buf: &mut Buffer) {
        let title = match &self.input_type {
            Some(InputType::Filter(column)) => format!("Filter {} (empty clears)", column),
            Some(InputType::OpenPath) => "Open CSV file".to_string(),
            None => String::new(),
        };
        let split = self.byte_index(self.input_cursor);
        let (before, rest) = self.input.split_at(split);
        let mut chars = rest.chars();
        let at_cursor = chars.next().map(String::from).unwrap_or_else(|| " ".to_string());
        let after: String = chars.collect();
        let line = Line::from(vec![
            Span::raw(before.to_string()),
            Span::styled(at_cursor, Style::default().add_modifier(Modifier::REVERSED)),
            Span::raw(after),
        ]);
        Paragraph::new(line)
            .style(Style::default().fg(self.color("text_primary")))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.color("sidebar_focus")))
                    .title(title),
            )
            .render(area, buf);
    }

    fn render_error_panel(&self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_rect(area, 70, 40);
        Clear.render(popup_area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Error")
            .border_style(Style::default().fg(self.color("modal_border_error")));
        let inner_area = block.inner(popup_area);
        block.render(popup_area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner_area);

        let text = vec![
            Line::styled(
                "Something went wrong.",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
            Line::styled(
                self.error_modal.message.as_str(),
                Style::default().fg(self.color("error")),
            ),
        ];
        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .render(chunks[0], buf);
        Paragraph::new("Esc/Enter to dismiss")
            .style(Style::default().fg(self.color("dimmed")))
            .centered()
            .render(chunks[1], buf);
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.debug.num_frames += 1;

        let background_color = self.color("background");
        Block::default()
            .style(Style::default().bg(background_color))
            .render(area, buf);

        let mut constraints = vec![Constraint::Fill(1)];
        if self.input_mode == InputMode::Editing {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Length(1)); // Controls
        if self.debug.enabled {
            constraints.push(Constraint::Length(1));
        }
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Fill(1)])
            .split(layout[0]);
        let (sidebar_area, cards_area) = (main[0], main[1]);

        // Extract colors before mutable borrow of the session
        let sidebar_colors = SidebarColors {
            border: self.color("sidebar_border"),
            focus: self.color("sidebar_focus"),
            text: self.color("text_primary"),
            filter_marker: self.color("filter_marker"),
        };
        let grid_colors = CardGridColors {
            lane_header: self.color("lane_header"),
            card_background: self.color("card_background"),
            card_text: self.color("card_text"),
            dimmed: self.color("dimmed"),
        };
        let text_color = self.color("text_primary");
        let dimmed_color = self.color("dimmed");

        Sidebar {
            columns: self.session.dataset().columns(),
            selection: self.session.selection(),
            state: &self.sidebar,
            focus: self.focus,
            colors: sidebar_colors,
        }
        .render(sidebar_area, buf);

        let title = self
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| APP_NAME.to_string());
        let grid_border = if self.focus == Focus::Cards {
            sidebar_colors.focus
        } else {
            sidebar_colors.border
        };
        let grid_block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(grid_border))
            .title(Span::styled(title, Style::default().fg(text_color)));
        let grid_area = grid_block.inner(cards_area);
        grid_block.render(cards_area, buf);

        let (shown, total) = if self.loading_state.is_loading() {
            App::render_loading_panel(&self.loading_state, grid_area, buf);
            (0, 0)
        } else if self.session.dataset().columns().is_empty() {
            Paragraph::new("No data. Press o to open a CSV file.")
                .style(Style::default().fg(dimmed_color))
                .centered()
                .render(grid_area, buf);
            (0, 0)
        } else {
            let view = self.session.view();
            CardGrid::new(&view, &self.color_parser, grid_colors)
                .card_width(self.card_width)
                .offsets(self.lane_offset, self.card_offset)
                .render(grid_area, buf);
            (view.filtered_rows, view.total_rows)
        };

        let mut next_area = 1;
        if self.input_mode == InputMode::Editing {
            self.render_input(layout[next_area], buf);
            next_area += 1;
        }

        Controls::with_row_counts(shown, total)
            .with_colors(
                self.color("controls_bg"),
                self.color("keybind_hints"),
                text_color,
            )
            .with_dimmed(self.error_modal.active || self.input_mode == InputMode::Editing)
            .render(layout[next_area], buf);
        next_area += 1;

        if self.debug.enabled && layout.len() > next_area {
            self.debug.render(layout[next_area], buf);
        }

        if self.error_modal.active {
            self.render_error_panel(area, buf);
        }
    }
}

fn centered_rect(r: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_to_open_options() {
        let args = Args {
            skip_rows: Some(2),
            no_header: Some(true),
            delimiter: Some(b';'),
            compression: Some(CompressionFormat::Gzip),
            ..Default::default()
        };
        let opts: OpenOptions = (&args).into();
        assert_eq!(opts.skip_rows, Some(2));
        assert_eq!(opts.has_header, Some(false));
        assert_eq!(opts.delimiter, Some(b';'));
        assert_eq!(opts.compression, Some(CompressionFormat::Gzip));
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config = AppConfig::default();
        config.file_loading.delimiter = Some(b'\t');
        config.file_loading.has_header = Some(false);
        config.file_loading.compression = Some("zstd".to_string());

        let opts = OpenOptions::from_args_and_config(&Args::default(), &config);
        assert_eq!(opts.delimiter, Some(b'\t'));
        assert_eq!(opts.has_header, Some(false));
        assert_eq!(opts.compression, Some(CompressionFormat::Zstd));

        let args = Args {
            delimiter: Some(b','),
            no_header: Some(false),
            ..Default::default()
        };
        let opts = OpenOptions::from_args_and_config(&args, &config);
        assert_eq!(opts.delimiter, Some(b','));
        assert_eq!(opts.has_header, Some(true));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(42), "42 B");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MiB");
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(outer, 70, 40);
        assert_eq!(inner.width, 70);
        assert_eq!(inner.height, 20);
        assert_eq!(inner.x, 15);
    }
}
