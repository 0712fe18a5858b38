#![allow(dead_code)]

use csvcards::color::ColorAssignment;
use csvcards::dataset::{Dataset, Record};
use csvcards::{ColorPolicy, Session};
use ratatui::style::Color;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

pub const PALETTE: [Color; 3] = [
    Color::Rgb(255, 0, 0),
    Color::Rgb(0, 255, 0),
    Color::Rgb(0, 0, 255),
];

/// Write `contents` to `name` inside a fresh temp dir. Keep the TempDir alive
/// for as long as the path is used.
pub fn write_csv(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write csv");
    (dir, path)
}

/// Gzip `contents` into `name` inside a fresh temp dir.
pub fn write_gz_csv(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    let file = fs::File::create(&path).expect("Failed to create gz file");
    let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    encoder
        .write_all(contents.as_bytes())
        .expect("Failed to write gz data");
    encoder.finish().expect("Failed to finish gz stream");
    (dir, path)
}

pub fn record(pairs: &[(&str, &str)]) -> Record {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Header `[name, system.name]` with rows A/X, B/Y, C/X.
pub fn systems_dataset() -> Dataset {
    Dataset::from_records(vec![
        record(&[("name", "A"), ("system.name", "X")]),
        record(&[("name", "B"), ("system.name", "Y")]),
        record(&[("name", "C"), ("system.name", "X")]),
    ])
}

pub fn palette_session(dataset: Dataset) -> Session {
    let mut session = Session::new(ColorAssignment::new(ColorPolicy::Palette, PALETTE.to_vec()));
    session.replace_dataset(dataset);
    session
}
