use anyhow::{anyhow, Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, error, info, log_enabled, warn, Level};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::line_classifier::ClassificationCounts;
use crate::reflow::{ReflowEngine, ReflowOptions};
use crate::subtitle_source::{resolve_source, LocalFileSource, SubtitleSource};

// @module: Application controller for transcript cleaning

/// Outcome of cleaning every subtitle file in a folder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Validated reflow options derived from the configuration
    options: ReflowOptions,
}

impl Controller {
    /// Create a controller with the default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller, rejecting invalid configuration up front
    pub fn with_config(config: Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| AppError::Config(format!("{:#}", e)))
            .context("Configuration validation failed")?;
        let options = config.reflow_options()?;

        Ok(Self { config, options })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn options(&self) -> &ReflowOptions {
        &self.options
    }

    /// Clean raw subtitle lines into the final transcript text
    pub fn clean_lines<S: AsRef<str>>(&self, lines: &[S]) -> String {
        debug!("Read {} lines from subtitle source", lines.len());
        if log_enabled!(Level::Debug) {
            debug!("Line kinds: {}", ClassificationCounts::from_lines(lines));
        }

        let transcript = ReflowEngine::new(self.options.clone()).reflow(lines);
        let cleaned = transcript.render();
        debug!(
            "Formatted transcript: {} blocks, {} words, {} bytes",
            transcript.blocks().len(),
            transcript.word_count(),
            cleaned.len()
        );

        cleaned
    }

    /// Resolve user input to a source and clean it into the output directory
    pub async fn run(&self, input: &str) -> Result<Option<PathBuf>> {
        let output_dir = self.config.resolve_output_dir()?;
        debug!("Using output directory: {}", output_dir.display());

        let source = Self::source_for(input, &self.config)?;
        self.run_source(source.as_ref(), &output_dir).await
    }

    /// Pick the source for user input, rejecting local files that are not SubRip
    fn source_for(input: &str, config: &Config) -> Result<Box<dyn SubtitleSource>> {
        if FileManager::file_exists(input) && !FileManager::is_subtitle_file(input) {
            return Err(AppError::File(format!("Not a SubRip subtitle file: {}", input)).into());
        }
        Ok(resolve_source(input, &config.fetch))
    }

    /// Clean one source into `<output_dir>/<title>.txt`
    ///
    /// Returns `None` when the output already exists and overwriting is off.
    /// The transcript is fully built in memory before anything is written.
    pub async fn run_source(&self, source: &dyn SubtitleSource, output_dir: &Path) -> Result<Option<PathBuf>> {
        let multi_progress = MultiProgress::new();
        self.run_source_with_progress(source, output_dir, &multi_progress).await
    }

    /// Same as `run_source`, drawing the spinner through a shared `MultiProgress`
    async fn run_source_with_progress(
        &self,
        source: &dyn SubtitleSource,
        output_dir: &Path,
        multi_progress: &MultiProgress,
    ) -> Result<Option<PathBuf>> {
        let start_time = Instant::now();
        info!("Cleaning subtitles for {}", source.describe());

        let spinner = Self::spinner(multi_progress, "Fetching title");
        let title = source.title().await;
        let title = match title {
            Ok(title) => title,
            Err(e) => {
                spinner.finish_and_clear();
                return Err(anyhow!(AppError::Source(e)).context(format!("Failed to get title for {}", source.describe())));
            }
        };
        debug!("Title: {}", title);

        let output_path = FileManager::generate_output_path(output_dir, &title);
        debug!("Output file will be: {}", output_path.display());

        if output_path.exists() && !self.config.force_overwrite {
            spinner.finish_and_clear();
            warn!("Skipping, transcript already exists: {} (use -f to force overwrite)", output_path.display());
            return Ok(None);
        }

        spinner.set_message("Downloading subtitles");
        let lines = source.fetch_lines().await;
        spinner.finish_and_clear();
        let lines = lines.with_context(|| format!("Failed to fetch subtitles for {}", source.describe()))?;

        let cleaned = self.clean_lines(&lines);
        if cleaned.is_empty() {
            warn!("No caption text found in {}", source.describe());
        }

        FileManager::write_to_file(&output_path, &cleaned)?;

        info!(
            "Success: {} ({})",
            output_path.display(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(Some(output_path))
    }

    /// Clean a source without writing anything
    pub async fn clean_to_string(&self, input: &str) -> Result<String> {
        let source = Self::source_for(input, &self.config)?;
        let lines = source
            .fetch_lines()
            .await
            .with_context(|| format!("Failed to fetch subtitles for {}", source.describe()))?;
        Ok(self.clean_lines(&lines))
    }

    /// Clean every `.srt` file under a directory
    ///
    /// Each transcript goes next to its subtitle file, or with an output
    /// directory configured, to the same relative location under it.
    pub async fn run_folder(&self, input_dir: &Path) -> Result<FolderSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let subtitle_files = FileManager::find_subtitle_files(input_dir)?;
        if subtitle_files.is_empty() {
            return Err(anyhow!("No subtitle files found in directory: {:?}", input_dir));
        }

        let multi_progress = MultiProgress::new();
        let folder_pb = multi_progress.add(ProgressBar::new(subtitle_files.len() as u64));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));

        let mut summary = FolderSummary::default();

        for subtitle_file in &subtitle_files {
            let file_name = subtitle_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let output_dir = self.folder_output_dir(input_dir, subtitle_file);
            let source = LocalFileSource::new(subtitle_file);

            match self.run_source_with_progress(&source, &output_dir, &multi_progress).await {
                Ok(Some(_)) => summary.processed += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.failed += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_and_clear();

        info!(
            "Folder processing completed: {} processed, {} skipped, {} errors ({})",
            summary.processed,
            summary.skipped,
            summary.failed,
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }

    /// Directory a folder-mode transcript is written to
    fn folder_output_dir(&self, input_dir: &Path, subtitle_file: &Path) -> PathBuf {
        let parent = subtitle_file.parent().unwrap_or(input_dir);
        match &self.config.output_dir {
            Some(output_root) => {
                let relative = parent.strip_prefix(input_dir).unwrap_or(Path::new(""));
                output_root.join(relative)
            }
            None => parent.to_path_buf(),
        }
    }

    /// Spinner shown while waiting on a source; hidden at debug level where
    /// the external tool writes to the terminal itself
    fn spinner(multi_progress: &MultiProgress, message: &str) -> ProgressBar {
        if log_enabled!(Level::Debug) {
            return ProgressBar::hidden();
        }

        let spinner = multi_progress.add(ProgressBar::new_spinner());
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }

    // Format duration in a human-readable format (HH:MM:SS)
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
