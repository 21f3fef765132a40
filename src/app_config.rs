use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::render::{RenderOptions, DEFAULT_LANGUAGE, DEFAULT_TITLE};
use crate::word_index::WordIndexOptions;

/// Application configuration module
/// This module handles loading and validating the configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Title used when a render request carries none
    #[serde(default = "default_title")]
    pub default_title: String,

    /// Document language code (ISO)
    #[serde(default = "default_language")]
    pub language: String,

    /// Directory rendered files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// TrueType font embedded into PDFs, for scripts outside WinAnsi
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_font: Option<String>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Speaker annotation settings
    #[serde(default)]
    pub speakers: SpeakerConfig,

    /// Summary settings
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Word index settings
    #[serde(default)]
    pub words: WordsConfig,
}

/// Speaker annotation settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeakerConfig {
    // @field: Annotate segments before rendering
    #[serde(default)]
    pub enabled: bool,

    // @field: Chat model name
    #[serde(default = "default_speaker_model")]
    pub model: String,

    // @field: OpenAI-compatible base URL
    #[serde(default = "default_speaker_endpoint")]
    pub endpoint: String,

    // @field: API key, OPENAI_API_KEY when empty
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Retry count for failed requests
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    // @field: Base backoff in milliseconds, doubled on each retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    // @field: Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for SpeakerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            model: default_speaker_model(),
            endpoint: default_speaker_endpoint(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            temperature: default_temperature(),
        }
    }
}

impl SpeakerConfig {
    /// Configured key, or the `OPENAI_API_KEY` environment variable
    pub fn get_api_key(&self) -> String {
        if !self.api_key.trim().is_empty() {
            return self.api_key.clone();
        }
        std::env::var("OPENAI_API_KEY").unwrap_or_default()
    }
}

/// Summary settings.
///
/// Requests go to the endpoint, key and retry policy configured under `speakers`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SummaryConfig {
    // @field: Chat model name
    #[serde(default = "default_summary_model")]
    pub model: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            model: default_summary_model(),
        }
    }
}

/// Word index settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WordsConfig {
    /// Number of words kept in the index
    #[serde(default = "default_max_words")]
    pub max_words: usize,

    /// Shorter words are ignored
    #[serde(default = "default_min_word_length")]
    pub min_word_length: usize,
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            max_words: default_max_words(),
            min_word_length: default_min_word_length(),
        }
    }
}

impl From<&WordsConfig> for WordIndexOptions {
    fn from(words: &WordsConfig) -> Self {
        WordIndexOptions {
            max_words: words.max_words,
            min_word_length: words.min_word_length,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_speaker_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_speaker_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

fn default_temperature() -> f32 {
    0.2
}

fn default_summary_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_words() -> usize {
    100
}

fn default_min_word_length() -> usize {
    3
}

impl Config {
    /// Read a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Read a configuration file, falling back to defaults when it is missing
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            warn!("Config file not found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_language_code(&self.language)?;

        if self.default_title.trim().is_empty() {
            return Err(anyhow!("Default title must not be blank"));
        }

        if let Some(font) = &self.pdf_font {
            if !Path::new(font).is_file() {
                return Err(anyhow!("PDF font file not found: {}", font));
            }
        }

        if self.summary.model.trim().is_empty() {
            return Err(anyhow!("summary.model must not be blank"));
        }

        if self.words.max_words == 0 {
            return Err(anyhow!("words.max_words must be greater than zero"));
        }

        if self.speakers.enabled {
            if self.speakers.get_api_key().trim().is_empty() {
                return Err(anyhow!("An API key is required when speaker annotation is enabled"));
            }
            url::Url::parse(&self.speakers.endpoint)
                .with_context(|| format!("Invalid speaker endpoint: {}", self.speakers.endpoint))?;
        }

        Ok(())
    }

    /// Render options for a request, falling back to the configured title
    pub fn render_options(&self, title: Option<&str>) -> RenderOptions {
        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.default_title);
        let language = crate::language_utils::normalize_to_part1_or_part2t(&self.language)
            .unwrap_or_else(|_| self.language.clone());
        RenderOptions {
            title: Some(title.to_string()),
            language: Some(language),
            ..Default::default()
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            default_title: default_title(),
            language: default_language(),
            output_dir: default_output_dir(),
            pdf_font: None,
            log_level: LogLevel::default(),
            speakers: SpeakerConfig::default(),
            summary: SummaryConfig::default(),
            words: WordsConfig::default(),
        }
    }
}
