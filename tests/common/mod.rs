/*!
 * Common test utilities for the tubescript test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use tubescript::segment::Segment;


/// Three segments with a speaker on the middle one
pub const SAMPLE_SEGMENTS_JSON: &str = r#"[
    {"start": 0.0, "text": "Welcome to the channel", "duration": 2.5},
    {"start": 2.5, "text": "Today we talk about Rust", "speaker_id": "Alice"},
    {"start": 65.25, "text": "Thanks for watching"}
]"#;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Writes the sample transcript as `filename` in `dir`
pub fn create_test_transcript(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_SEGMENTS_JSON)
}

/// The sample transcript as segments
pub fn sample_segments() -> Vec<Segment> {
    vec![
        Segment::new(0.0, "Welcome to the channel").with_duration(2.5),
        Segment::new(2.5, "Today we talk about Rust").with_speaker("Alice"),
        Segment::new(65.25, "Thanks for watching"),
    ]
}

/// `count` evenly spaced segments for larger documents
pub fn generate_segments(count: usize) -> Vec<Segment> {
    (0..count)
        .map(|i| Segment::new(i as f64 * 4.0, format!("Segment number {} talks about compilers and borrow checking", i)))
        .collect()
}
