// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use cleansrt::app_config::{Config, LogLevel};
use cleansrt::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// Options shared by every cleaning command
#[derive(Args, Debug, Clone)]
struct CommonOptions {
    /// Directory for cleaned transcripts (default: current directory, or next
    /// to each subtitle file for `folder`)
    #[arg(short, long, alias = "od", value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Enable debug logging output (same as --log-level debug)
    #[arg(long)]
    debug: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Configuration file path
    #[arg(short, long, default_value = "cleansrt.json")]
    config_path: String,

    /// Wrap output lines at this many characters (0 disables wrapping)
    #[arg(short, long, allow_negative_numbers = true)]
    wrap_width: Option<i64>,

    /// Keep caption groups as paragraphs instead of one stream
    #[arg(short, long)]
    paragraphs: bool,

    /// Break the transcript into sentences, also inside paragraphs
    #[arg(long, conflicts_with = "no_sentences")]
    sentences: bool,

    /// Do not break the transcript into sentences
    #[arg(long)]
    no_sentences: bool,

    /// Keep leading ">>" speaker markers
    #[arg(long)]
    keep_speaker_markers: bool,

    /// Force overwrite of existing transcripts
    #[arg(short, long)]
    force: bool,
}

impl CommonOptions {
    /// Level requested on the command line, if any
    fn requested_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            Some(LogLevel::Debug)
        } else {
            self.log_level.map(LogLevel::from)
        }
    }

    /// Override configuration values with the ones given on the command line
    fn apply_to(&self, config: &mut Config) {
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = Some(output_dir.clone());
        }
        if let Some(wrap_width) = self.wrap_width {
            config.reflow.wrap_width = wrap_width;
        }
        if self.paragraphs {
            config.reflow.group_by_blank_line = true;
        }
        if self.sentences {
            config.reflow.split_sentences = Some(true);
        }
        if self.no_sentences {
            config.reflow.split_sentences = Some(false);
        }
        if self.keep_speaker_markers {
            config.reflow.strip_speaker_marker = false;
        }
        if self.force {
            config.force_overwrite = true;
        }
        if let Some(log_level) = self.requested_log_level() {
            config.log_level = log_level;
        }
    }
}

/// Options for cleaning a single source
#[derive(Args, Debug, Clone)]
struct CleanOptions {
    #[command(flatten)]
    common: CommonOptions,

    /// Caption language to download (e.g. 'en', 'de')
    #[arg(long)]
    sub_lang: Option<String>,

    /// Print the cleaned transcript instead of writing a file
    #[arg(long)]
    stdout: bool,
}

impl CleanOptions {
    fn apply_to(&self, config: &mut Config) {
        self.common.apply_to(config);
        if let Some(sub_lang) = &self.sub_lang {
            config.fetch.sub_lang = sub_lang.clone();
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clean the captions of a video URL or a local .srt file (default command)
    Clean {
        /// Video URL or path to an .srt file
        #[arg(value_name = "SOURCE")]
        source: String,

        #[command(flatten)]
        options: CleanOptions,
    },

    /// Clean every .srt file in a directory, writing transcripts next to them
    /// or into the same layout under --output-dir
    Folder {
        /// Directory to scan recursively
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        #[command(flatten)]
        options: CommonOptions,
    },

    /// Generate shell completions for cleansrt
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// cleansrt - readable transcripts from auto-generated captions
#[derive(Parser, Debug)]
#[command(name = "cleansrt")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(about = "Downloads and cleans auto-generated subtitles into readable text")]
#[command(long_about = "cleansrt turns auto-generated SubRip captions into readable prose: it drops
cue numbers and timings, removes scrolling repeats and speaker markers, and
re-flows the words into sentences or paragraphs.

EXAMPLES:
    cleansrt https://www.youtube.com/watch?v=ID     # Download captions with yt-dlp and clean them
    cleansrt -o ~/notes https://youtu.be/ID         # Write the transcript to ~/notes
    cleansrt talk.en.srt                            # Clean a local subtitle file
    cleansrt -w 80 -p talk.en.srt                   # Paragraphs wrapped at 80 columns
    cleansrt -p --sentences talk.en.srt             # Paragraphs, one sentence per line
    cleansrt --stdout talk.en.srt                   # Print instead of writing a file
    cleansrt folder ./captions                      # Clean every .srt under a directory
    cleansrt folder -o ./notes ./captions           # Same, mirrored under ./notes
    cleansrt completions bash > cleansrt.bash       # Generate bash completions

OUTPUT:
    The transcript is written to <output dir>/<title>.txt and the path is
    printed on stdout. Titles come from yt-dlp for URLs and from the file
    name for local files.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Video URL or path to an .srt file
    #[arg(value_name = "SOURCE")]
    source: Option<String>,

    #[command(flatten)]
    options: CleanOptions,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config has been read
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "cleansrt", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Clean { source, options }) => run_clean(&source, &options).await,
        Some(Commands::Folder { dir, options }) => run_folder(&dir, &options).await,
        None => {
            let source = cli.source.ok_or_else(|| {
                anyhow!("SOURCE is required when no subcommand is specified")
            })?;
            run_clean(&source, &cli.options).await
        }
    }
}

/// Load the config file, apply command line overrides and set the log level
///
/// With `persist_defaults` a missing config file is created with defaults.
fn load_config(
    common: &CommonOptions,
    persist_defaults: bool,
    apply_overrides: impl FnOnce(&mut Config),
) -> Result<Config> {
    // Apply a command line level right away so config loading is logged at it
    if let Some(level) = common.requested_log_level() {
        log::set_max_level(level.to_level_filter());
    }

    let mut config = if persist_defaults {
        Config::load_or_create(&common.config_path)?
    } else {
        Config::load_if_exists(&common.config_path)?
    };
    apply_overrides(&mut config);
    log::set_max_level(config.log_level.to_level_filter());

    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

async fn run_clean(source: &str, options: &CleanOptions) -> Result<()> {
    // --stdout leaves no files behind, the config file included
    let config = load_config(&options.common, !options.stdout, |config| options.apply_to(config))?;
    let controller = Controller::with_config(config)?;

    if options.stdout {
        let cleaned = controller.clean_to_string(source).await?;
        print!("{}", cleaned);
        return Ok(());
    }

    // Only the output path goes to stdout, for scripts
    if let Some(output_path) = controller.run(source).await? {
        println!("{}", output_path.display());
    }

    Ok(())
}

async fn run_folder(dir: &Path, options: &CommonOptions) -> Result<()> {
    let config = load_config(options, true, |config| options.apply_to(config))?;
    let controller = Controller::with_config(config)?;

    let summary = controller.run_folder(dir).await?;
    if summary.failed > 0 {
        return Err(anyhow!("{} of {} files failed", summary.failed, summary.processed + summary.skipped + summary.failed));
    }

    Ok(())
}
