use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::debug;

use crate::char_fixes::CharFixes;
use crate::decoding::Decoder;
use crate::errors::{FormatError, SubtitleError};
use crate::file_utils::FileManager;

// @module: Subtitle cell segmentation, deletion and renumbering

// @const: Cell separator, also used for output
pub const CELL_DELIMITER: &str = "\n\n";

// @const: Cell separator for files with Windows line endings
pub const CRLF_CELL_DELIMITER: &str = "\r\n\r\n";

/// Split decoded subtitle text into cells.
///
/// `"\n\n"` is used when it occurs anywhere in the text, otherwise
/// `"\r\n\r\n"`. Text containing neither is not an SRT document.
/// Delimiters are dropped from the cells.
pub fn split_cells(text: &str) -> Result<Vec<String>, FormatError> {
    let delimiter = if text.contains(CELL_DELIMITER) {
        CELL_DELIMITER
    } else if text.contains(CRLF_CELL_DELIMITER) {
        CRLF_CELL_DELIMITER
    } else {
        return Err(FormatError);
    };

    Ok(text.split(delimiter).map(str::to_owned).collect())
}

/// Copy of `cells` without the entries at `indices`, order preserved.
///
/// Indices that are out of range are ignored; the input is left untouched.
pub fn remove_cells<T: Clone>(cells: &[T], indices: &[usize]) -> Vec<T> {
    let doomed: HashSet<usize> = indices.iter().copied().collect();
    cells
        .iter()
        .enumerate()
        .filter(|(index, _)| !doomed.contains(index))
        .map(|(_, cell)| cell.clone())
        .collect()
}

// @const: UTF-8 byte-order mark as decoded text
const BOM: char = '\u{FEFF}';

/// Replace the first line of a cell with its new number.
///
/// A leading byte-order mark and a `\r` terminating the old first line are
/// kept.
fn renumber_cell(cell: &str, number: usize) -> String {
    let bom = if cell.starts_with(BOM) { "\u{FEFF}" } else { "" };
    match cell.split_once('\n') {
        Some((first, rest)) => {
            let cr = if first.ends_with('\r') { "\r" } else { "" };
            format!("{}{}{}\n{}", bom, number, cr, rest)
        }
        None => format!("{}{}", bom, number),
    }
}

/// Renumber cells and join them into SRT text.
///
/// Only cells with at least two lines are counted and renumbered; shorter
/// fragments are written back as they are. The result ends with exactly one
/// newline unless there are no cells at all.
pub fn serialize_cells<S: AsRef<str>>(cells: &[S]) -> String {
    let mut counter = 0;
    let renumbered: Vec<String> = cells
        .iter()
        .map(|cell| {
            let cell = cell.as_ref();
            if cell.lines().count() >= 2 {
                counter += 1;
                renumber_cell(cell, counter)
            } else {
                cell.to_string()
            }
        })
        .collect();

    let mut output = renumbered.join(CELL_DELIMITER);
    if !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }
    output
}

/// One subtitle file loaded for cleaning
#[derive(Debug, Clone)]
pub struct SubtitleDocument {
    // @field: File the cells came from and are saved to
    path: PathBuf,

    // @field: Cells in file order
    cells: Vec<String>,

    // @field: Whether the file needs rewriting
    modified: bool,
}

impl SubtitleDocument {
    /// Read, decode, normalize and split the subtitle file at `path`
    pub fn open<P: AsRef<Path>>(path: P, decoder: &Decoder, fixes: &CharFixes) -> Result<Self, SubtitleError> {
        let path = path.as_ref();
        let bytes = FileManager::read_bytes(path).map_err(|source| SubtitleError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let text = decoder.decode(&bytes);
        Self::parse(path, text, fixes)
    }

    /// Build a document from already decoded text
    pub fn parse<P: AsRef<Path>>(path: P, text: String, fixes: &CharFixes) -> Result<Self, SubtitleError> {
        let path = path.as_ref().to_path_buf();

        let (text, modified) = fixes.normalize(text);
        if modified {
            debug!("Fixed problematic characters in {:?}", path);
        }

        let cells = match split_cells(&text) {
            Ok(cells) => cells,
            Err(source) => return Err(SubtitleError::Format { path, source }),
        };
        debug!("Split {:?} into {} cells", path, cells.len());

        Ok(SubtitleDocument { path, cells, modified })
    }

    /// Renumbered SRT text for the current cells
    pub fn to_srt_string(&self) -> String {
        serialize_cells(&self.cells)
    }
}

/// A loaded subtitle file as seen by matching and review.
///
/// The controller only works with cells; how they are read, renumbered and
/// written back is up to the container format.
pub trait CellPipeline {
    /// File the cells came from and are saved to
    fn path(&self) -> &Path;

    /// Cells in file order
    fn cells(&self) -> &[String];

    /// Whether saving would change the file on disk
    fn is_modified(&self) -> bool;

    /// Remove cells chosen during review. Indices refer to the current cells;
    /// an empty set changes nothing.
    fn delete_cells(&mut self, indices: &[usize]);

    /// Write the current cells back to `path`
    fn save(&self) -> Result<(), SubtitleError>;
}

impl CellPipeline for SubtitleDocument {
    fn path(&self) -> &Path {
        &self.path
    }

    fn cells(&self) -> &[String] {
        &self.cells
    }

    fn is_modified(&self) -> bool {
        self.modified
    }

    fn delete_cells(&mut self, indices: &[usize]) {
        if indices.is_empty() {
            return;
        }
        self.cells = remove_cells(&self.cells, indices);
        self.modified = true;
    }

    // Always UTF-8, whatever the file was decoded from
    fn save(&self) -> Result<(), SubtitleError> {
        FileManager::write_atomic(&self.path, &self.to_srt_string()).map_err(|source| {
            SubtitleError::Unsaveable {
                path: self.path.clone(),
                source,
            }
        })
    }
}
