use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::errors::PatternError;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    /// Resolve files and directories into the subtitle files to clean.
    ///
    /// Directories are walked recursively. Only writable files whose
    /// extension is in `extensions` (case-insensitive) are kept. The result
    /// is deduplicated and sorted.
    pub fn collect_targets<P: AsRef<Path>>(paths: &[P], extensions: &[String]) -> Vec<PathBuf> {
        let mut found = BTreeSet::new();

        for path in paths {
            let path = path.as_ref();
            if path.is_dir() {
                for entry in WalkDir::new(path).follow_links(true) {
                    match entry {
                        Ok(entry) if entry.file_type().is_file() => {
                            Self::consider(entry.path(), extensions, &mut found);
                        }
                        Ok(_) => {}
                        Err(e) => warn!("Skipping unreadable directory entry: {}", e),
                    }
                }
            } else if path.is_file() {
                Self::consider(path, extensions, &mut found);
            } else {
                warn!("Target does not exist: {:?}", path);
            }
        }

        found.into_iter().collect()
    }

    fn consider(path: &Path, extensions: &[String], found: &mut BTreeSet<PathBuf>) {
        if !Self::has_extension(path, extensions) {
            return;
        }
        if !Self::is_writable(path) {
            debug!("Skipping read-only file: {:?}", path);
            return;
        }
        let path = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        found.insert(path);
    }

    // @checks: Extension against the configured subtitle extensions
    pub fn has_extension<P: AsRef<Path>>(path: P, extensions: &[String]) -> bool {
        path.as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy())
            .is_some_and(|ext| {
                extensions
                    .iter()
                    .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(&ext))
            })
    }

    // @checks: File can be rewritten in place
    pub fn is_writable<P: AsRef<Path>>(path: P) -> bool {
        fs::metadata(path)
            .map(|meta| meta.is_file() && !meta.permissions().readonly())
            .unwrap_or(false)
    }

    /// Read a whole file as bytes
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    /// Replace `path` with `content` through a temporary file in the same
    /// directory, so the original is only swapped out once the new text is
    /// fully on disk. The original's permissions carry over.
    ///
    /// Files with other hard links, and files in directories where no
    /// temporary file can be created, are rewritten in place instead.
    pub fn write_atomic<P: AsRef<Path>>(path: P, content: &str) -> io::Result<()> {
        let path = path.as_ref();
        let meta = fs::metadata(path).ok();
        if meta.as_ref().is_some_and(Self::has_other_links) {
            debug!("{:?} is hard linked, writing in place", path);
            return Self::write_in_place(path, content);
        }

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = match NamedTempFile::new_in(dir) {
            Ok(temp) => temp,
            Err(e) => {
                debug!("No temporary file next to {:?} ({}), writing in place", path, e);
                return Self::write_in_place(path, content);
            }
        };
        temp.write_all(content.as_bytes())?;
        temp.as_file().sync_all()?;

        if let Some(meta) = meta {
            fs::set_permissions(temp.path(), meta.permissions())?;
        }

        temp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Truncate `path` and write `content` into the same file
    pub fn write_in_place<P: AsRef<Path>>(path: P, content: &str) -> io::Result<()> {
        let mut file = fs::OpenOptions::new().write(true).truncate(true).open(path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()
    }

    #[cfg(unix)]
    fn has_other_links(meta: &fs::Metadata) -> bool {
        use std::os::unix::fs::MetadataExt;
        meta.nlink() > 1
    }

    #[cfg(not(unix))]
    fn has_other_links(_meta: &fs::Metadata) -> bool {
        false
    }

    /// Load match terms from pattern files, one term per line.
    ///
    /// Line endings are stripped and blank lines skipped. Files are read in
    /// order and their terms concatenated.
    pub fn load_terms<P: AsRef<Path>>(files: &[P]) -> Result<Vec<String>, PatternError> {
        let mut terms = Vec::new();

        for file in files {
            let file = file.as_ref();
            let content = fs::read_to_string(file).map_err(|source| PatternError::TermFileLoad {
                path: file.to_path_buf(),
                source,
            })?;

            terms.extend(
                content
                    .split('\n')
                    .map(|line| line.trim_end_matches('\r'))
                    .filter(|line| !line.is_empty())
                    .map(str::to_owned),
            );
        }

        if terms.is_empty() {
            return Err(PatternError::EmptySet);
        }

        debug!("Loaded {} terms from {} pattern file(s)", terms.len(), files.len());
        Ok(terms)
    }
}
