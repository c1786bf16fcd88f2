/*!
 * Subtitle acquisition.
 *
 * Sources hand the reflow engine raw SubRip lines:
 * - `YtDlpSource`: downloads auto-generated captions for a video URL with yt-dlp
 * - `LocalFileSource`: reads an `.srt` file from disk
 *
 * Acquisition failures are reported as `SourceError` and are fatal to the
 * run; nothing is cleaned or written when a source fails.
 */

use async_trait::async_trait;
use log::{debug, log_enabled, Level};
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::app_config::FetchConfig;
use crate::errors::SourceError;
use crate::file_utils::FileManager;

/// Something that can produce a title and SubRip lines
#[async_trait]
pub trait SubtitleSource: Send + Sync + Debug {
    /// Human readable description for logs
    fn describe(&self) -> String;

    /// Title used to name the output file
    async fn title(&self) -> Result<String, SourceError>;

    /// Raw subtitle lines in file order, without line terminators
    async fn fetch_lines(&self) -> Result<Vec<String>, SourceError>;
}

/// Pick a source for user input: an existing file is read locally,
/// anything else is handed to yt-dlp
pub fn resolve_source(input: &str, fetch: &FetchConfig) -> Box<dyn SubtitleSource> {
    let path = Path::new(input);
    if FileManager::file_exists(path) {
        Box::new(LocalFileSource::new(path))
    } else {
        Box::new(YtDlpSource::new(input, fetch.clone()))
    }
}

/// Subtitle file already on disk
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    path: PathBuf,
}

impl LocalFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SubtitleSource for LocalFileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn title(&self) -> Result<String, SourceError> {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().trim().to_string())
            .filter(|stem| !stem.is_empty())
            .ok_or(SourceError::EmptyTitle)
    }

    async fn fetch_lines(&self) -> Result<Vec<String>, SourceError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        Ok(FileManager::split_lines(&content))
    }
}

/// Auto-generated captions downloaded with yt-dlp
#[derive(Debug, Clone)]
pub struct YtDlpSource {
    url: String,
    config: FetchConfig,
}

impl YtDlpSource {
    pub fn new(url: &str, config: FetchConfig) -> Self {
        Self {
            url: url.to_string(),
            config,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Run yt-dlp with a timeout and return its stdout
    ///
    /// With debug logging enabled the tool's diagnostics go straight to our
    /// stderr; otherwise they are captured and attached to the error.
    async fn run_ytdlp(&self, args: &[String], capture_stdout: bool) -> Result<String, SourceError> {
        let tool = self.config.ytdlp_path.clone();
        let forward = log_enabled!(Level::Debug);

        debug!("Running {} {}", tool, args.join(" "));

        let mut command = Command::new(&tool);
        command.args(args).stdin(Stdio::null()).kill_on_drop(true);

        if capture_stdout || !forward {
            command.stdout(Stdio::piped());
        } else {
            command.stdout(Stdio::from(std::io::stderr()));
        }
        if forward {
            command.stderr(Stdio::inherit());
        } else {
            command.stderr(Stdio::piped());
        }

        let timeout_secs = self.config.timeout_secs;
        let output = tokio::select! {
            result = command.output() => {
                result.map_err(|e| SourceError::ToolNotFound {
                    tool: tool.clone(),
                    message: e.to_string(),
                })?
            },
            _ = tokio::time::sleep(Duration::from_secs(timeout_secs)) => {
                return Err(SourceError::Timeout { tool, secs: timeout_secs });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SourceError::ToolFailed {
                tool,
                status: output.status.to_string(),
                stderr: filter_ytdlp_stderr(&stderr),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Locate the converted subtitle file in the download directory
    fn find_downloaded_subtitle(&self, dir: &Path) -> Result<PathBuf, SourceError> {
        let expected = dir.join(format!("transcript.{}.srt", self.config.sub_lang));
        if expected.is_file() {
            return Ok(expected);
        }

        // yt-dlp may tag the file with a language variant such as "en-orig"
        FileManager::find_subtitle_files(dir)
            .ok()
            .and_then(|files| files.into_iter().next())
            .ok_or(SourceError::MissingSubtitle(expected))
    }
}

#[async_trait]
impl SubtitleSource for YtDlpSource {
    fn describe(&self) -> String {
        format!("video {}", self.url)
    }

    async fn title(&self) -> Result<String, SourceError> {
        let args = vec!["--get-title".to_string(), self.url.clone()];
        let stdout = self.run_ytdlp(&args, true).await?;

        stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or(SourceError::EmptyTitle)
    }

    async fn fetch_lines(&self) -> Result<Vec<String>, SourceError> {
        let temp_dir = tempfile::Builder::new().prefix("cleansrt_").tempdir()?;
        debug!("Temporary directory: {}", temp_dir.path().display());

        let template = temp_dir.path().join("transcript.%(ext)s");
        let args = vec![
            "--write-auto-sub".to_string(),
            "--sub-lang".to_string(),
            self.config.sub_lang.clone(),
            "--skip-download".to_string(),
            "--convert-subs".to_string(),
            "srt".to_string(),
            "-o".to_string(),
            template.to_string_lossy().into_owned(),
            self.url.clone(),
        ];
        self.run_ytdlp(&args, false).await?;
        debug!("yt-dlp finished successfully");

        let subtitle_path = self.find_downloaded_subtitle(temp_dir.path())?;
        debug!("Subtitle file: {}", subtitle_path.display());

        let content = tokio::fs::read_to_string(&subtitle_path).await?;
        Ok(FileManager::split_lines(&content))
    }
}

/// Keep the meaningful part of yt-dlp's stderr: errors and warnings
/// rather than progress chatter.
fn filter_ytdlp_stderr(stderr: &str) -> String {
    let meaningful: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('['))
        .collect();

    if meaningful.is_empty() {
        "no error output".to_string()
    } else {
        meaningful.join("\n")
    }
}
