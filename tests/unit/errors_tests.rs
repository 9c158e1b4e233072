/*!
 * Tests for error types and conversions
 */

use std::io;
use std::path::PathBuf;

use subnuker::errors::{AppError, FormatError, PatternError, SubtitleError};

#[test]
fn test_subtitleError_format_shouldNameFile() {
    let error = SubtitleError::Format {
        path: PathBuf::from("show.srt"),
        source: FormatError,
    };
    assert_eq!(error.to_string(), "'show.srt' does not appear to be a 'srt' subtitle file");
}

#[test]
fn test_subtitleError_unreadable_shouldIncludeCause() {
    let error = SubtitleError::Unreadable {
        path: PathBuf::from("gone.srt"),
        source: io::Error::new(io::ErrorKind::NotFound, "No such file"),
    };
    let display = error.to_string();
    assert!(display.contains("gone.srt"));
    assert!(display.contains("No such file"));
}

#[test]
fn test_patternError_emptySet_shouldDisplayCorrectly() {
    assert_eq!(PatternError::EmptySet.to_string(), "No terms were loaded");
}

#[test]
fn test_appError_fromSubtitleError_shouldWrapCorrectly() {
    let error: AppError = SubtitleError::Unsaveable {
        path: PathBuf::from("ro.srt"),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    }
    .into();

    assert!(matches!(error, AppError::Subtitle(_)));
    assert!(error.to_string().starts_with("Subtitle error: Unable to save 'ro.srt'"));
}
