/*!
 * Error types for the cleansrt application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building reflow options
///
/// The reflow engine itself never fails on input text; only its
/// configuration can be rejected.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReflowError {
    /// Wrap width below zero
    #[error("Invalid wrap width {0}: must be 0 (no wrapping) or a positive number of characters")]
    NegativeWrapWidth(i64),
}

/// Errors that can occur while acquiring subtitles from a source
#[derive(Error, Debug)]
pub enum SourceError {
    /// The external tool could not be started
    #[error("Failed to run {tool}: {message}")]
    ToolNotFound {
        /// Executable that was invoked
        tool: String,
        /// Underlying spawn error
        message: String,
    },

    /// The external tool exited unsuccessfully
    #[error("{tool} failed ({status}): {stderr}")]
    ToolFailed {
        /// Executable that was invoked
        tool: String,
        /// Exit status description
        status: String,
        /// Filtered stderr output
        stderr: String,
    },

    /// The external tool did not finish in time
    #[error("{tool} timed out after {secs} seconds")]
    Timeout {
        /// Executable that was invoked
        tool: String,
        /// Configured timeout
        secs: u64,
    },

    /// The tool finished but produced no subtitle file
    #[error("No subtitle file was produced at {0:?}")]
    MissingSubtitle(PathBuf),

    /// The source reported an empty title
    #[error("Source returned an empty title")]
    EmptyTitle,

    /// I/O failure while reading the acquired subtitles
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the reflow options
    #[error("Reflow error: {0}")]
    Reflow(#[from] ReflowError),

    /// Error from subtitle acquisition
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}
