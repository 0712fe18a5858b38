mod common;

use common::write_csv;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use csvcards::sidebar::Focus;
use csvcards::{App, AppEvent, InputMode, OpenOptions};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::path::PathBuf;
use std::sync::mpsc::channel;

fn new_app() -> App {
    let (tx, _rx) = channel::<AppEvent>();
    App::new(tx)
}

/// Feed an event and every follow-up event it produces.
fn dispatch(app: &mut App, event: AppEvent) {
    let mut next = Some(event);
    while let Some(event) = next {
        next = app.event(&event);
    }
}

fn press(app: &mut App, code: KeyCode) {
    dispatch(app, AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn screen(app: &mut App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
    terminal
        .draw(|frame| frame.render_widget(&mut *app, frame.area()))
        .expect("draw");
    let buffer = terminal.backend().buffer();
    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn loaded_app(contents: &str) -> (tempfile::TempDir, App) {
    let (dir, path) = write_csv("people.csv", contents);
    let mut app = new_app();
    dispatch(&mut app, AppEvent::Open(path, OpenOptions::new()));
    (dir, app)
}

const PEOPLE: &str = "name,city\nAlice,Paris\nBob,Rome\nCara,Paris\n";

#[test]
fn test_open_shows_loading_before_load() {
    let (_dir, path) = write_csv("people.csv", PEOPLE);
    let mut app = new_app();

    let next = app.event(&AppEvent::Open(path.clone(), OpenOptions::new()));
    assert!(app.is_loading());
    assert!(matches!(next, Some(AppEvent::DoLoad(_, _))));
    let text = screen(&mut app, 100, 30);
    assert!(text.contains("Loading people.csv"));
    assert!(text.contains("Reading file (42 B)"));

    dispatch(&mut app, next.expect("DoLoad"));
    assert!(!app.is_loading());
    assert_eq!(app.path(), Some(path.as_path()));
    assert_eq!(app.session().dataset().num_rows(), 3);
}

#[test]
fn test_cards_render_after_load() {
    let (_dir, mut app) = loaded_app(PEOPLE);
    let text = screen(&mut app, 100, 30);
    assert!(text.contains("All (3)"));
    assert!(text.contains("name: Alice"));
    assert!(text.contains("city: Rome"));
    assert!(text.contains("Rows: 3/3"));
}

#[test]
fn test_space_toggles_highlighted_column() {
    let (_dir, mut app) = loaded_app(PEOPLE);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char(' '));
    assert!(!app.session().selection().is_visible("city"));
    assert!(!screen(&mut app, 100, 30).contains("city: Rome"));

    press(&mut app, KeyCode::Enter);
    assert!(app.session().selection().is_visible("city"));
}

#[test]
fn test_sidebar_sets_color_and_group_by() {
    let (_dir, mut app) = loaded_app(PEOPLE);

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus(), Focus::ColorBy);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.session().selection().color_by(), Some("name"));

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus(), Focus::GroupBy);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.session().selection().group_by(), Some("city"));
    let text = screen(&mut app, 100, 30);
    assert!(text.contains("Paris (2)"));
    assert!(text.contains("Rome (1)"));

    // Back to None
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.session().selection().group_by(), None);
}

#[test]
fn test_filter_prompt_applies_and_clears() {
    let (_dir, mut app) = loaded_app(PEOPLE);

    press(&mut app, KeyCode::Char('/'));
    assert_eq!(app.input_mode, InputMode::Editing);
    type_text(&mut app, "AL");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.session().selection().filters().get("name"), Some("AL"));
    assert!(screen(&mut app, 100, 30).contains("Rows: 1/3"));

    // Prompt is prefilled with the current filter; clearing it removes the filter
    press(&mut app, KeyCode::Char('/'));
    assert_eq!(app.input(), "AL");
    press(&mut app, KeyCode::Backspace);
    press(&mut app, KeyCode::Backspace);
    press(&mut app, KeyCode::Enter);
    assert!(app.session().selection().filters().is_empty());
}

#[test]
fn test_filter_keeps_surrounding_spaces() {
    let (_dir, mut app) = loaded_app("name,city\nAl Bo,Paris\nAl,Rome\n");
    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, " bo");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.session().selection().filters().get("name"), Some(" bo"));
    assert!(screen(&mut app, 100, 30).contains("Rows: 1/2"));
}

#[test]
fn test_filter_key_uses_focused_section() {
    let (_dir, mut app) = loaded_app(PEOPLE);

    // Group By cursor on "city" while the Columns cursor stays on "name"
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus(), Focus::GroupBy);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "rome");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.session().selection().filters().get("city"), Some("rome"));
    assert_eq!(app.session().selection().filters().get("name"), None);

    // "None" has no column to filter
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Char('/'));
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn test_escape_cancels_prompt() {
    let (_dir, mut app) = loaded_app(PEOPLE);
    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "zzz");
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.session().selection().filters().is_empty());
}

#[test]
fn test_clear_filters_key() {
    let (_dir, mut app) = loaded_app(PEOPLE);
    dispatch(
        &mut app,
        AppEvent::Filter("city".to_string(), Some("rome".to_string())),
    );
    assert_eq!(app.session().selection().filters().len(), 1);
    press(&mut app, KeyCode::Char('c'));
    assert!(app.session().selection().filters().is_empty());
}

#[test]
fn test_open_prompt_replaces_dataset() {
    let (_dir, mut app) = loaded_app(PEOPLE);
    dispatch(&mut app, AppEvent::GroupBy(Some("city".to_string())));
    let (_dir2, other) = write_csv("pets.csv", "pet\ncat\ndog\n");

    press(&mut app, KeyCode::Char('o'));
    assert_eq!(app.input_mode, InputMode::Editing);
    // Replace the prefilled path
    press(&mut app, KeyCode::End);
    for _ in 0..app.input().chars().count() {
        press(&mut app, KeyCode::Backspace);
    }
    type_text(&mut app, &other.display().to_string());
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.path(), Some(other.as_path()));
    assert_eq!(app.session().dataset().columns(), ["pet".to_string()]);
    assert_eq!(app.session().selection().group_by(), None);
    assert_eq!(app.focus(), Focus::Columns);
}

#[test]
fn test_load_failure_shows_error_panel_and_recovers() {
    let (_dir, mut app) = loaded_app(PEOPLE);
    let missing = PathBuf::from("/no/such/dir/people.csv");
    dispatch(&mut app, AppEvent::Open(missing, OpenOptions::new()));

    assert!(app.session().dataset().is_empty());
    assert!(app.session().dataset().columns().is_empty());
    let message = app.error_message().expect("error panel");
    assert!(message.contains("not found"), "got: {}", message);
    let text = screen(&mut app, 100, 30);
    assert!(text.contains("Something went wrong."));

    // Keys other than Esc/Enter are swallowed by the panel
    let quit = app.event(&AppEvent::Key(KeyEvent::new(
        KeyCode::Char('q'),
        KeyModifiers::NONE,
    )));
    assert!(quit.is_none());
    press(&mut app, KeyCode::Esc);
    assert!(app.error_message().is_none());
    assert!(screen(&mut app, 100, 30).contains("No data. Press o to open a CSV file."));
}

#[test]
fn test_empty_file_is_not_an_error() {
    let (_dir, mut app) = loaded_app("");
    assert!(app.error_message().is_none());
    assert!(app.session().dataset().is_empty());
    assert!(screen(&mut app, 100, 30).contains("No data."));
}

#[test]
fn test_quit_key() {
    let mut app = new_app();
    let next = app.event(&AppEvent::Key(KeyEvent::new(
        KeyCode::Char('q'),
        KeyModifiers::NONE,
    )));
    assert!(matches!(next, Some(AppEvent::Exit)));
}

#[test]
fn test_card_scrolling_is_clamped() {
    let (_dir, mut app) = loaded_app(PEOPLE);
    press(&mut app, KeyCode::BackTab);
    assert_eq!(app.focus(), Focus::Cards);
    for _ in 0..10 {
        press(&mut app, KeyCode::Down);
    }
    let text = screen(&mut app, 100, 30);
    assert!(text.contains("name: Cara"));
    assert!(!text.contains("name: Alice"));
}
