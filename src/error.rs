//! Error types for traytemp operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in traytemp operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (row log, summary file, config file, indicator output).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for the glyph canvas.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Invalid glyph layout (e.g. zero line pitch).
    #[error("Invalid glyph layout: {0}")]
    InvalidLayout(String),

    /// A rolling window was configured with zero capacity.
    #[error("Rolling window capacity must be at least 1")]
    InvalidCapacity,

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Tier thresholds are out of order or not finite.
    #[error("Invalid thresholds: medium {medium} must be finite and <= high {high}")]
    InvalidThresholds {
        /// Medium threshold.
        medium: f64,
        /// High threshold.
        high: f64,
    },

    /// Refresh interval is not one of the supported presets.
    #[error("Invalid refresh interval: {0}s (supported: 1, 2, 5, 10, 15, 30, 60)")]
    InvalidRefresh(u64),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Tooltip text exceeds what the status indicator can display.
    #[error("Tooltip is {len} characters, indicator limit is {max}")]
    TooltipTooLong {
        /// Actual length in characters.
        len: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// `start()` called while a session is already recording.
    #[error("a logging session is already recording")]
    AlreadyRecording,

    /// `append()` or `stop()` called while no session is recording.
    #[error("no logging session is recording")]
    NotRecording,

    /// The display unit cannot change while a session is recording.
    #[error("temperature unit cannot change while a logging session is recording")]
    UnitLockedWhileRecording,

    /// The sampling loop stopped while a session was still recording.
    #[error("shut down while recording; unsummarised rows remain in {}", row_log.display())]
    RecordingAtShutdown {
        /// Location of the row log that was left on disk.
        row_log: PathBuf,
    },

    /// A user command could not be parsed.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}
