/*!
 * # cleansrt - readable transcripts from auto-generated captions
 *
 * A Rust library for turning machine-generated SubRip (.srt) captions into
 * prose that can actually be read.
 *
 * ## Features
 *
 * - Drop cue numbers and timing lines
 * - Suppress captions that scrolling re-emits verbatim
 * - Strip `>>` speaker markers
 * - Re-segment the text into sentences or paragraphs
 * - Wrap lines to a maximum width without splitting words
 * - Download auto-generated captions with yt-dlp
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `line_classifier`: Tags raw lines as blank, index, timestamp or content
 * - `reflow`: The transcript reflow engine:
 *   - `reflow::dedup`: Speaker marker stripping and repeat suppression
 *   - `reflow::sentences`: Punctuation-based sentence segmentation
 *   - `reflow::wrap`: Greedy word wrapping
 * - `subtitle_source`: Subtitle acquisition (yt-dlp, local files)
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod line_classifier;
pub mod reflow;
pub mod subtitle_source;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ReflowError, SourceError};
pub use line_classifier::{classify, LineKind};
pub use reflow::{clean_transcript, OutputBlock, ReflowEngine, ReflowOptions, Transcript};
pub use subtitle_source::{LocalFileSource, SubtitleSource, YtDlpSource};
