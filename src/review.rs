/*!
 * Deciding which matched cells get deleted.
 *
 * In automatic mode every match is deleted. In interactive mode each match is
 * shown on a [`ReviewConsole`] and a single keypress decides: `y` deletes,
 * `n` keeps, anything else aborts the whole run. An abort is returned to the
 * caller as [`ReviewOutcome::Aborted`]; nothing gathered for the file is kept,
 * and the outcome says whether that threw away any changes.
 */

use std::io;
use std::path::Path;

use log::debug;

/// Whether the user is asked about each match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewMode {
    /// Delete every match without asking
    Automatic,
    /// Ask about every match
    Interactive,
}

/// What a single keypress means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Delete,
    Keep,
    Abort,
}

impl ReviewDecision {
    /// Case-insensitive: `y` deletes, `n` keeps, anything else aborts
    pub fn from_key(key: char) -> Self {
        match key.to_ascii_lowercase() {
            'y' => ReviewDecision::Delete,
            'n' => ReviewDecision::Keep,
            _ => ReviewDecision::Abort,
        }
    }
}

/// Result of reviewing one file's matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// Every match was decided; these indices are to be deleted, ascending
    Reviewed(Vec<usize>),
    /// The user cancelled; the run must stop without saving this file
    Aborted {
        /// Confirmed deletions or earlier fixes were dropped along with it
        discarded: bool,
    },
}

/// One matched cell put in front of the user
#[derive(Debug, Clone, Copy)]
pub struct ReviewPrompt<'a> {
    pub path: &'a Path,
    pub cell: &'a str,
    /// 1-based number of the cell in the file as loaded
    pub cell_number: usize,
}

impl ReviewPrompt<'_> {
    /// The confirmation question shown under the cell
    pub fn question(&self) -> String {
        format!("Delete cell {} of '{}'?", self.cell_number, self.path.display())
    }
}

/// Where interactive review happens.
///
/// The terminal implementation lives in [`crate::terminal`]; tests drive
/// review with scripted keys.
pub trait ReviewConsole {
    /// Show a matched cell and the confirmation question
    fn present(&mut self, prompt: &ReviewPrompt<'_>) -> io::Result<()>;

    /// Block until a single key is pressed and return it
    fn read_key(&mut self) -> io::Result<char>;

    /// Clear what `present` showed once the user has answered
    fn dismiss(&mut self) -> io::Result<()>;
}

/// The matches of one file awaiting a decision
#[derive(Debug, Clone, Copy)]
pub struct Review<'a> {
    path: &'a Path,
    cells: &'a [String],
    matches: &'a [usize],
    has_pending_changes: bool,
}

impl<'a> Review<'a> {
    /// `has_pending_changes` marks a file already modified before review,
    /// e.g. by character fixes, so an abort reports it as discarded.
    pub fn new(path: &'a Path, cells: &'a [String], matches: &'a [usize], has_pending_changes: bool) -> Self {
        Review {
            path,
            cells,
            matches,
            has_pending_changes,
        }
    }

    /// Decide which matches to delete
    pub fn resolve<C: ReviewConsole + ?Sized>(&self, mode: ReviewMode, console: &mut C) -> io::Result<ReviewOutcome> {
        if mode == ReviewMode::Automatic {
            return Ok(ReviewOutcome::Reviewed(self.matches.to_vec()));
        }

        let mut deletions = Vec::new();

        for &index in self.matches {
            let prompt = ReviewPrompt {
                path: self.path,
                cell: &self.cells[index],
                cell_number: index + 1,
            };
            console.present(&prompt)?;

            match ReviewDecision::from_key(console.read_key()?) {
                ReviewDecision::Delete => {
                    console.dismiss()?;
                    deletions.push(index);
                }
                ReviewDecision::Keep => {
                    console.dismiss()?;
                }
                ReviewDecision::Abort => {
                    debug!("Review of {:?} aborted at cell {}", self.path, index + 1);
                    return Ok(ReviewOutcome::Aborted {
                        discarded: !deletions.is_empty() || self.has_pending_changes,
                    });
                }
            }
        }

        Ok(ReviewOutcome::Reviewed(deletions))
    }
}
