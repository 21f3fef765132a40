/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;
use tubescript::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "segments.json", "[]")?;

    assert!(FileManager::file_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for directories and missing files
#[test]
fn test_file_exists_withDirectoryOrMissingFile_shouldReturnFalse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(!FileManager::file_exists(temp_dir.path().join("missing.json")));

    Ok(())
}

/// Test that ensure_dir creates nested directories
#[test]
fn test_ensure_dir_withNestedPath_shouldCreateAllLevels() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b").join("c");

    FileManager::ensure_dir(&nested)?;
    assert!(nested.is_dir());

    // Calling again on an existing directory is fine
    FileManager::ensure_dir(&nested)?;

    Ok(())
}

/// Test that write_bytes creates the parent directory and round-trips content
#[test]
fn test_write_bytes_withMissingParent_shouldCreateItAndWrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("out").join("transcript_abc.pdf");

    FileManager::write_bytes(&target, b"%PDF-1.3 test")?;

    assert_eq!(fs::read(&target)?, b"%PDF-1.3 test");
    Ok(())
}

/// Test reading text files
#[test]
fn test_read_to_string_withExistingAndMissingFiles_shouldBehave() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_transcript(temp_dir.path(), "talk.json")?;

    assert_eq!(FileManager::read_to_string(&path)?, common::SAMPLE_SEGMENTS_JSON);

    let missing = FileManager::read_to_string(temp_dir.path().join("nope.json"));
    assert!(missing.is_err());
    assert!(format!("{:#}", missing.unwrap_err()).contains("Failed to read file"));

    Ok(())
}
