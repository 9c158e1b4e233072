use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::char_fixes::CharFixes;
use crate::decoding::Decoder;
use crate::errors::AppError;
use crate::patterns::PatternSet;
use crate::review::{Review, ReviewConsole, ReviewMode, ReviewOutcome};
use crate::subtitle_processor::{CellPipeline, SubtitleDocument};

// @module: Application controller for subtitle cleaning

/// What happened to a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Nothing to change; the file was not touched
    Unchanged,
    /// The file was rewritten
    Saved {
        /// Number of cells removed
        deleted: usize,
    },
    /// Review was cancelled; the file was not touched and the run must stop
    Aborted,
}

/// Per-file result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    /// Whether any cell matched a pattern
    pub matched: bool,
    pub outcome: FileOutcome,
}

/// Result of a whole batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Files fully processed, including unchanged ones
    pub files_processed: usize,
    /// Files rewritten on disk
    pub files_written: usize,
    /// Whether any file had a match
    pub any_matches: bool,
    /// Whether the user cancelled the run
    pub aborted: bool,
}

/// Main application controller for subtitle cleaning
pub struct Controller {
    // @field: Patterns for the whole batch
    patterns: PatternSet,

    // @field: Byte decoding with encoding overrides
    decoder: Decoder,

    // @field: Character fixes applied before matching
    char_fixes: CharFixes,

    // @field: Automatic or interactive review
    mode: ReviewMode,
}

impl Controller {
    // @method: Create a new controller from an already validated configuration
    pub fn with_config(config: &Config, patterns: PatternSet, mode: ReviewMode) -> Self {
        debug!("Matching against {} pattern(s)", patterns.len());

        Self {
            patterns,
            decoder: config.decoder(),
            char_fixes: config.char_fix_table(),
            mode,
        }
    }

    /// Clean one subtitle file.
    ///
    /// The file is rewritten only if character fixes changed it or cells were
    /// deleted; an aborted review leaves it untouched.
    pub fn process_file<C: ReviewConsole + ?Sized>(&self, path: &Path, console: &mut C) -> Result<FileReport, AppError> {
        let mut document = SubtitleDocument::open(path, &self.decoder, &self.char_fixes)?;
        self.clean(&mut document, console)
    }

    /// Match, review, delete and save the cells of a loaded document
    pub fn clean<D, C>(&self, document: &mut D, console: &mut C) -> Result<FileReport, AppError>
    where
        D: CellPipeline + ?Sized,
        C: ReviewConsole + ?Sized,
    {
        let path = document.path().to_path_buf();
        let matches = self.patterns.search(document.cells());
        let matched = !matches.is_empty();
        let mut deleted = 0;

        if matched {
            debug!("{} matching cell(s) in {:?}", matches.len(), path);

            let review = Review::new(&path, document.cells(), &matches, document.is_modified());
            let outcome = review
                .resolve(self.mode, console)
                .map_err(|e| AppError::Terminal(e.to_string()))?;

            let deletions = match outcome {
                ReviewOutcome::Reviewed(deletions) => deletions,
                ReviewOutcome::Aborted { discarded } => {
                    if discarded {
                        warn!("Not saving changes made to '{}'", path.display());
                    }
                    return Ok(FileReport {
                        path,
                        matched,
                        outcome: FileOutcome::Aborted,
                    });
                }
            };

            deleted = deletions.len();
            document.delete_cells(&deletions);
        }

        let outcome = if document.is_modified() {
            document.save()?;
            info!("Saved {:?} ({} cell(s) removed)", path, deleted);
            FileOutcome::Saved { deleted }
        } else {
            FileOutcome::Unchanged
        };

        Ok(FileReport {
            path,
            matched,
            outcome,
        })
    }

    /// Clean files one after another.
    ///
    /// The first fatal error ends the batch. An abort stops it as well;
    /// files saved before that stay saved.
    pub fn run_batch<C: ReviewConsole + ?Sized>(&self, paths: &[PathBuf], console: &mut C) -> Result<BatchReport, AppError> {
        let mut report = BatchReport::default();

        for path in paths {
            debug!("Processing {:?}", path);
            let file_report = self.process_file(path, console)?;

            report.any_matches |= file_report.matched;
            match file_report.outcome {
                FileOutcome::Aborted => {
                    report.aborted = true;
                    return Ok(report);
                }
                FileOutcome::Saved { .. } => report.files_written += 1,
                FileOutcome::Unchanged => {}
            }
            report.files_processed += 1;
        }

        Ok(report)
    }
}
