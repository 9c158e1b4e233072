/*!
 * # subnuker
 *
 * Scan for and remove advertising from SRT subtitle files.
 *
 * ## Features
 *
 * - Decode subtitle files of unknown encoding
 * - Split files into cells on blank lines
 * - Match cells against literal terms or regular expressions
 * - Confirm each deletion interactively, or delete every match
 * - Renumber the remaining cells and rewrite the file atomically
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `decoding`: Byte to text decoding with encoding detection
 * - `char_fixes`: Character substitutions applied before matching
 * - `subtitle_processor`: Cell splitting, deletion and renumbering
 * - `patterns`: Literal and regex match patterns
 * - `review`: Deciding which matches to delete
 * - `terminal`: Interactive review on the terminal
 * - `file_utils`: File discovery, pattern files and atomic writes
 * - `app_controller`: Per-file pipeline and batch loop
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod char_fixes;
pub mod decoding;
pub mod errors;
pub mod file_utils;
pub mod patterns;
pub mod review;
pub mod subtitle_processor;
pub mod terminal;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{BatchReport, Controller, FileOutcome, FileReport};
pub use errors::{AppError, ConfigError, PatternError, SubtitleError};
pub use patterns::{MatchMode, Pattern, PatternSet};
pub use review::{ReviewConsole, ReviewMode, ReviewOutcome};
pub use subtitle_processor::{CellPipeline, SubtitleDocument};
