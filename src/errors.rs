/*!
 * Error types for the subnuker application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Text that has no blank-line separated cells at all
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no blank-line cell delimiter found")]
pub struct FormatError;

/// Errors that can occur while processing a single subtitle file
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The file could not be opened or read
    #[error("Unable to read '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The decoded text does not have the SRT cell structure
    #[error("'{}' does not appear to be a 'srt' subtitle file", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    /// Modifications were computed but could not be written back
    #[error("Unable to save '{}': {source}", path.display())]
    Unsaveable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors raised while building the pattern set, before any file is touched
#[derive(Error, Debug)]
pub enum PatternError {
    /// A regex source failed to compile
    #[error("Invalid regular expression '{pattern}': {source}")]
    Compile {
        pattern: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    /// A pattern file could not be read
    #[error("Unable to load pattern file '{}'", path.display())]
    TermFileLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Nothing to match against
    #[error("No terms were loaded")]
    EmptySet,
}

/// Errors in the configuration file or its values
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Character fixes must map exactly one character to exactly one character
    #[error("Invalid character fix '{key}' -> '{value}': both sides must be a single character")]
    InvalidCharFix { key: String, value: String },

    /// No subtitle extensions left to look for
    #[error("At least one subtitle file extension must be configured")]
    NoExtensions,

    /// The configuration file could not be read
    #[error("Failed to open config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid JSON for this schema
    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error while preparing match patterns
    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// Error in the configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The interactive console failed
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}
