/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use tubescript::app_config::{Config, LogLevel};
use tubescript::word_index::WordIndexOptions;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.default_title, "Transcript");
    assert_eq!(config.language, "en");
    assert_eq!(config.output_dir, ".");
    assert_eq!(config.log_level, LogLevel::Info);

    assert!(!config.speakers.enabled);
    assert_eq!(config.speakers.model, "gpt-4o-mini");
    assert_eq!(config.speakers.endpoint, "https://api.openai.com/v1");
    assert_eq!(config.speakers.timeout_secs, 60);
    assert_eq!(config.speakers.max_retries, 3);
    assert_eq!(config.speakers.retry_backoff_ms, 1000);

    assert_eq!(config.summary.model, "gpt-4o-mini");
    assert!(config.pdf_font.is_none());

    assert_eq!(config.words.max_words, 100);
    assert_eq!(config.words.min_word_length, 3);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.language = "zz".to_string();
    assert!(config.validate().is_err());
    config.language = "deu".to_string();
    assert!(config.validate().is_ok());

    config.default_title = "   ".to_string();
    assert!(config.validate().is_err());
    config.default_title = "Notes".to_string();

    config.words.max_words = 0;
    assert!(config.validate().is_err());
    config.words.max_words = 10;

    config.speakers.enabled = true;
    config.speakers.api_key = "sk-test".to_string();
    assert!(config.validate().is_ok());

    config.speakers.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_withMissingPdfFont_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = Config::default();

    config.pdf_font = Some(temp_dir.path().join("missing.ttf").to_string_lossy().to_string());
    assert!(config.validate().is_err());

    let font = common::create_test_file(temp_dir.path(), "font.ttf", "bytes")?;
    config.pdf_font = Some(font.to_string_lossy().to_string());
    assert!(config.validate().is_ok());

    config.summary.model = " ".to_string();
    assert!(config.validate().is_err());
    Ok(())
}

/// Speakers need a key from the config or the environment
#[test]
fn test_config_validation_withSpeakersAndNoKey_shouldFail() {
    if std::env::var("OPENAI_API_KEY").is_ok() {
        return;
    }

    let mut config = Config::default();
    config.speakers.enabled = true;
    assert!(config.validate().is_err());
}

/// Test partial JSON picks up defaults for everything else
#[test]
fn test_from_file_withPartialJson_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{"default_title": "Lecture", "log_level": "debug", "words": {"max_words": 25}}"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.default_title, "Lecture");
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.words.max_words, 25);
    assert_eq!(config.words.min_word_length, 3);
    assert_eq!(config.summary.model, "gpt-4o-mini");
    assert_eq!(config.language, "en");
    assert!(!config.speakers.enabled);

    Ok(())
}

#[test]
fn test_from_file_withMalformedJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::from_file(&path).is_err());
    Ok(())
}

/// A missing file means defaults and nothing written to disk
#[test]
fn test_load_or_default_withMissingFile_shouldNotCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_default(&path)?;

    assert_eq!(config.default_title, "Transcript");
    assert!(!path.exists());
    Ok(())
}

#[test]
fn test_render_options_shouldFallBackToConfiguredTitle() {
    let mut config = Config::default();
    config.default_title = "Weekly Sync".to_string();
    config.language = "fre".to_string();

    let options = config.render_options(None);
    assert_eq!(options.title(), "Weekly Sync");
    assert_eq!(options.language(), "fr");

    let options = config.render_options(Some("Keynote"));
    assert_eq!(options.title(), "Keynote");

    let options = config.render_options(Some("  "));
    assert_eq!(options.title(), "Weekly Sync");
}

#[test]
fn test_words_config_shouldConvertToIndexOptions() {
    let config = Config::default();
    let options: WordIndexOptions = (&config.words).into();

    assert_eq!(options.max_words, 100);
    assert_eq!(options.min_word_length, 3);
}

#[test]
fn test_config_serialization_shouldRoundTripThroughJson() -> Result<()> {
    let mut config = Config::default();
    config.log_level = LogLevel::Trace;

    let json = serde_json::to_string_pretty(&config)?;
    assert!(json.contains("\"log_level\": \"trace\""));

    let parsed: Config = serde_json::from_str(&json)?;
    assert_eq!(parsed.log_level, LogLevel::Trace);
    Ok(())
}
