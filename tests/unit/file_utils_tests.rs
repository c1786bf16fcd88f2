/*!
 * Tests for file utility functions
 */

use std::fs;
use std::path::Path;
use anyhow::Result;
use cleansrt::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Unsafe characters in a video title become dashes
#[test]
fn test_sanitize_filename_withUnsafeCharacters_shouldReplaceWithDash() {
    assert_eq!(
        FileManager::sanitize_filename("AC/DC: Live? <\"Best\"> of|all*\\"),
        "AC-DC- Live- --Best-- of-all--"
    );
    assert_eq!(FileManager::sanitize_filename("  Plain title  "), "Plain title");
}

/// Test that generate_output_path creates the correct path
#[test]
fn test_generate_output_path_withValidInputs_shouldCreateCorrectPath() {
    let output_dir = Path::new("/tmp/output");

    let output_path = FileManager::generate_output_path(output_dir, "Rust: the talk");

    assert_eq!(output_path, Path::new("/tmp/output/Rust- the talk.txt"));
}

/// Test that find_subtitle_files walks nested folders in sorted order
#[test]
fn test_find_subtitle_files_withNestedFolders_shouldReturnSortedSrtFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("season1");
    fs::create_dir(&nested)?;

    common::create_test_subtitle(temp_dir.path(), "b.srt")?;
    common::create_test_subtitle(&nested, "a.SRT")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "not subtitles")?;

    let files = FileManager::find_subtitle_files(temp_dir.path())?;

    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("b.srt"));
    assert!(files[1].ends_with("season1/a.SRT"));

    Ok(())
}

/// A byte order mark does not end up in the first line
#[test]
fn test_read_lines_withBomAndCrlf_shouldReturnCleanLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "bom.srt",
        "\u{feff}1\r\n00:00:00,000 --> 00:00:01,000\r\nHi\r\n",
    )?;

    let lines = FileManager::read_lines(&path)?;

    assert_eq!(lines, vec!["1", "00:00:00,000 --> 00:00:01,000", "Hi"]);

    Ok(())
}

/// Reading a missing file names the path in the error
#[test]
fn test_read_to_string_withMissingFile_shouldReportPath() {
    let result = FileManager::read_to_string("/definitely/not/here.srt");

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("here.srt"));
}

/// Writing into a missing directory creates it
#[test]
fn test_write_to_file_withMissingParent_shouldCreateDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out").join("deep").join("talk.txt");

    FileManager::write_to_file(&path, "Hello.\n")?;

    assert_eq!(fs::read_to_string(&path)?, "Hello.\n");

    Ok(())
}

/// Subtitle detection by extension and by content
#[test]
fn test_is_subtitle_file_withVariousFiles_shouldDetectSubRip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let by_extension = common::create_test_file(temp_dir.path(), "empty.srt", "")?;
    let by_content = common::create_test_subtitle(temp_dir.path(), "captions.download")?;
    let plain = common::create_test_file(temp_dir.path(), "readme.txt", "a --> b")?;

    assert!(FileManager::is_subtitle_file(&by_extension));
    assert!(FileManager::is_subtitle_file(&by_content));
    assert!(!FileManager::is_subtitle_file(&plain));
    assert!(!FileManager::is_subtitle_file(temp_dir.path().join("missing.srt")));

    Ok(())
}
