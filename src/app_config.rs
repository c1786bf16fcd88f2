use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::errors::AppError;
use crate::reflow::ReflowOptions;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Transcript reflow settings
    #[serde(default)]
    pub reflow: ReflowConfig,

    /// Subtitle acquisition settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Directory for cleaned transcripts (current directory when unset)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Overwrite existing transcripts
    #[serde(default)]
    pub force_overwrite: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// How the cleaned transcript is laid out
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReflowConfig {
    // @field: One paragraph per caption group instead of one stream
    #[serde(default)]
    pub group_by_blank_line: bool,

    // @field: Max line width, 0 = no wrapping; negative values are rejected
    #[serde(default)]
    pub wrap_width: i64,

    // @field: Remove leading ">>" speaker markers
    #[serde(default = "default_true")]
    pub strip_speaker_marker: bool,

    // @field: Sentence segmentation; unset = only when not grouping by paragraph
    #[serde(default)]
    pub split_sentences: Option<bool>,
}

impl Default for ReflowConfig {
    fn default() -> Self {
        Self {
            group_by_blank_line: false,
            wrap_width: 0,
            strip_speaker_marker: true,
            split_sentences: None,
        }
    }
}

/// External subtitle downloader settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FetchConfig {
    /// yt-dlp executable name or path
    #[serde(default = "default_ytdlp_path")]
    pub ytdlp_path: String,

    /// Auto-generated caption language to request
    #[serde(default = "default_sub_lang")]
    pub sub_lang: String,

    /// Timeout for each yt-dlp invocation in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: default_ytdlp_path(),
            sub_lang: default_sub_lang(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_ytdlp_path() -> String {
    "yt-dlp".to_string()
}

fn default_sub_lang() -> String {
    "en".to_string()
}

fn default_timeout_secs() -> u64 {
    300 // caption download plus srt conversion
}

impl Config {
    /// Load the configuration file, or write and return defaults if it is missing
    ///
    /// Failing to write the default file is not fatal: the run continues
    /// with the defaults.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        if let Err(e) = config.save(path) {
            warn!("Could not write default config, continuing with defaults: {:#}", e);
        }
        Ok(config)
    }

    /// Load the configuration file if present, defaults otherwise; never writes
    pub fn load_if_exists<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        ReflowOptions::checked_wrap_width(self.reflow.wrap_width)?;

        if self.fetch.ytdlp_path.trim().is_empty() {
            return Err(anyhow!("yt-dlp path must not be empty"));
        }

        if self.fetch.sub_lang.trim().is_empty() {
            return Err(anyhow!("Subtitle language must not be empty"));
        }

        if self.fetch.timeout_secs == 0 {
            return Err(anyhow!("Fetch timeout must be greater than zero"));
        }

        Ok(())
    }

    /// Build validated reflow options from the configuration
    pub fn reflow_options(&self) -> Result<ReflowOptions, AppError> {
        let mut options = ReflowOptions::default()
            .with_paragraphs(self.reflow.group_by_blank_line)
            .with_speaker_markers_stripped(self.reflow.strip_speaker_marker)
            .with_wrap_width(self.reflow.wrap_width)?;
        options.split_sentences = self.reflow.split_sentences;
        Ok(options)
    }

    /// Output directory, falling back to the current working directory
    pub fn resolve_output_dir(&self) -> Result<PathBuf> {
        match &self.output_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().context("Failed to get current directory"),
        }
    }
}
