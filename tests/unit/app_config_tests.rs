/*!
 * Tests for application configuration
 */

use std::fs;
use anyhow::Result;
use cleansrt::app_config::{Config, LogLevel};
use cleansrt::reflow::ReflowOptions;
use log::LevelFilter;
use crate::common;

/// Test that a missing config file is created with defaults
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("cleansrt.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config.reflow.wrap_width, 0);
    assert_eq!(config.fetch.ytdlp_path, "yt-dlp");
    assert_eq!(config.fetch.sub_lang, "en");

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(written["log_level"], "info");
    assert!(written["reflow"]["split_sentences"].is_null());

    Ok(())
}

/// Test that an existing config file is read back
#[test]
fn test_load_or_create_withExistingFile_shouldLoadValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "cleansrt.json",
        r#"{
            "reflow": { "group_by_blank_line": true, "wrap_width": 72 },
            "fetch": { "sub_lang": "de" },
            "force_overwrite": true,
            "log_level": "debug"
        }"#,
    )?;

    let config = Config::load_or_create(&path)?;

    assert!(config.reflow.group_by_blank_line);
    assert_eq!(config.reflow.wrap_width, 72);
    assert_eq!(config.fetch.sub_lang, "de");
    assert_eq!(config.fetch.timeout_secs, 300);
    assert!(config.force_overwrite);
    assert_eq!(config.log_level, LogLevel::Debug);

    Ok(())
}

/// Test that an unwritable default config does not stop the run
#[test]
fn test_load_or_create_withUnwritableLocation_shouldReturnDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("no-such-dir").join("cleansrt.json");

    let config = Config::load_or_create(&path)?;

    assert_eq!(config.reflow, Config::default().reflow);
    assert!(!path.exists());

    Ok(())
}

/// Test that a read-only load never creates the file
#[test]
fn test_load_if_exists_withMissingFile_shouldNotWriteAnything() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("cleansrt.json");

    let config = Config::load_if_exists(&path)?;

    assert_eq!(config.fetch.sub_lang, "en");
    assert!(!path.exists());

    common::create_test_file(temp_dir.path(), "cleansrt.json", r#"{"reflow": {"wrap_width": 90}}"#)?;
    assert_eq!(Config::load_if_exists(&path)?.reflow.wrap_width, 90);

    Ok(())
}

/// Test that a paragraph config without an explicit sentence setting keeps
/// paragraphs whole
#[test]
fn test_reflow_options_withParagraphsOnly_shouldNotSplitSentences() -> Result<()> {
    let mut config = Config::default();
    config.reflow.group_by_blank_line = true;

    let options = config.reflow_options()?;

    assert_eq!(options.split_sentences, None);
    assert!(!options.sentences_enabled());

    Ok(())
}

/// Test that malformed JSON is reported instead of replaced
#[test]
fn test_load_or_create_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "cleansrt.json", "{ not json")?;

    let result = Config::load_or_create(&path);

    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&path)?, "{ not json");

    Ok(())
}

/// Test that save and load agree
#[test]
fn test_save_thenLoad_shouldKeepChanges() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("custom.json");

    let mut config = Config::default();
    config.reflow.wrap_width = 100;
    config.reflow.strip_speaker_marker = false;
    config.output_dir = Some(temp_dir.path().join("out"));
    config.save(&path)?;

    let loaded = Config::load_or_create(&path)?;
    assert_eq!(loaded.reflow, config.reflow);
    assert_eq!(loaded.output_dir, config.output_dir);

    Ok(())
}

/// Test that validation rejects a negative wrap width
#[test]
fn test_validate_withNegativeWrapWidth_shouldFail() {
    let mut config = Config::default();
    config.reflow.wrap_width = -5;

    let error = config.validate().unwrap_err();
    assert!(error.to_string().contains("-5"));
    assert!(config.reflow_options().is_err());
}

/// Test that validation rejects empty fetch settings
#[test]
fn test_validate_withEmptyFetchSettings_shouldFail() {
    let mut config = Config::default();
    config.fetch.ytdlp_path = "  ".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.fetch.sub_lang = String::new();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.fetch.timeout_secs = 0;
    assert!(config.validate().is_err());

    assert!(Config::default().validate().is_ok());
}

/// Test that reflow settings turn into engine options
#[test]
fn test_reflow_options_withCustomSettings_shouldMapEveryField() -> Result<()> {
    let mut config = Config::default();
    config.reflow.group_by_blank_line = true;
    config.reflow.wrap_width = 40;
    config.reflow.strip_speaker_marker = false;
    config.reflow.split_sentences = Some(false);

    let options = config.reflow_options()?;

    assert_eq!(
        options,
        ReflowOptions {
            group_by_blank_line: true,
            wrap_width: 40,
            strip_speaker_marker: false,
            split_sentences: Some(false),
        }
    );

    Ok(())
}

/// Test the output directory fallback
#[test]
fn test_resolve_output_dir_withoutSetting_shouldUseCurrentDir() -> Result<()> {
    let config = Config::default();
    assert_eq!(config.resolve_output_dir()?, std::env::current_dir()?);

    let temp_dir = common::create_temp_dir()?;
    let config = Config {
        output_dir: Some(temp_dir.path().to_path_buf()),
        ..Config::default()
    };
    assert_eq!(config.resolve_output_dir()?, temp_dir.path());

    Ok(())
}

/// Test the log level mapping
#[test]
fn test_logLevel_toLevelFilter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), LevelFilter::Error);
    assert_eq!(LogLevel::Warn.to_level_filter(), LevelFilter::Warn);
    assert_eq!(LogLevel::Info.to_level_filter(), LevelFilter::Info);
    assert_eq!(LogLevel::Debug.to_level_filter(), LevelFilter::Debug);
    assert_eq!(LogLevel::Trace.to_level_filter(), LevelFilter::Trace);
}
