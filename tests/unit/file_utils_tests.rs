/*!
 * Tests for file utility functions
 */

use std::fs;

use anyhow::Result;
use subnuker::errors::PatternError;
use subnuker::file_utils::FileManager;
use crate::common;

fn srt_only() -> Vec<String> {
    vec!["srt".to_string()]
}

/// Directories are walked and only subtitle files are kept, sorted
#[test]
fn test_collectTargets_withDirectory_shouldFindSrtFilesRecursively() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("season1");
    fs::create_dir(&nested)?;

    let b = common::create_test_subtitle(temp_dir.path(), "b.srt")?;
    let a = common::create_test_subtitle(&nested, "a.SRT")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "not a subtitle")?;

    let targets = FileManager::collect_targets(&[temp_dir.path()], &srt_only());

    let mut expected = vec![fs::canonicalize(a)?, fs::canonicalize(b)?];
    expected.sort();
    assert_eq!(targets, expected);
    Ok(())
}

/// The same file named twice is only processed once
#[test]
fn test_collectTargets_withDuplicates_shouldDeduplicate() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;

    let targets = FileManager::collect_targets(&[file.clone(), file.clone(), temp_dir.path().to_path_buf()], &srt_only());

    assert_eq!(targets, vec![fs::canonicalize(file)?]);
    Ok(())
}

/// Read-only and missing files are skipped
#[test]
fn test_collectTargets_withReadOnlyAndMissing_shouldSkipThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let locked = common::create_test_subtitle(temp_dir.path(), "locked.srt")?;
    let mut permissions = fs::metadata(&locked)?.permissions();
    permissions.set_readonly(true);
    fs::set_permissions(&locked, permissions)?;

    let missing = temp_dir.path().join("missing.srt");
    let targets = FileManager::collect_targets(&[locked, missing], &srt_only());

    assert!(targets.is_empty());
    Ok(())
}

/// Extension matching ignores case and a leading dot in the configuration
#[test]
fn test_hasExtension_shouldIgnoreCaseAndDot() {
    let extensions = vec![".srt".to_string()];
    assert!(FileManager::has_extension("movie.SRT", &extensions));
    assert!(!FileManager::has_extension("movie.ass", &extensions));
    assert!(!FileManager::has_extension("srt", &extensions));
}

/// Atomic writes replace the whole file
#[test]
fn test_writeAtomic_shouldReplaceContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "out.srt", "old content that is longer")?;

    FileManager::write_atomic(&file, "new")?;

    assert_eq!(fs::read_to_string(&file)?, "new");
    assert_eq!(fs::read_dir(temp_dir.path())?.count(), 1);
    Ok(())
}

/// In-place writes truncate longer content
#[test]
fn test_writeInPlace_shouldTruncateOldContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "out.srt", "old content that is longer")?;

    FileManager::write_in_place(&file, "new")?;

    assert_eq!(fs::read_to_string(&file)?, "new");
    Ok(())
}

/// Hard linked files are rewritten in place so every link sees the new text
#[cfg(unix)]
#[test]
fn test_writeAtomic_withHardLink_shouldUpdateBothNames() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let link = temp_dir.path().join("linked.srt");
    fs::hard_link(&file, &link)?;

    FileManager::write_atomic(&file, "cleaned\n")?;

    assert_eq!(fs::read_to_string(&file)?, "cleaned\n");
    assert_eq!(fs::read_to_string(&link)?, "cleaned\n");
    Ok(())
}

/// A writable file in a read-only directory is still saved
#[cfg(unix)]
#[test]
fn test_writeAtomic_withReadOnlyDirectory_shouldWriteInPlace() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = common::create_temp_dir()?;
    let locked_dir = temp_dir.path().join("locked");
    fs::create_dir(&locked_dir)?;
    let file = common::create_test_subtitle(&locked_dir, "movie.srt")?;
    fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o555))?;

    // Privileged users ignore directory permissions; nothing to check then
    let enforced = fs::File::create(locked_dir.join("scratch")).is_err();
    let result = if enforced {
        FileManager::write_atomic(&file, "cleaned\n")
    } else {
        Ok(())
    };

    fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o755))?;
    result?;
    if enforced {
        assert_eq!(fs::read_to_string(&file)?, "cleaned\n");
        assert_eq!(fs::read_dir(&locked_dir)?.count(), 1);
    }
    Ok(())
}

/// Terms from several files are concatenated in order, blank lines dropped
#[test]
fn test_loadTerms_withSeveralFiles_shouldConcatenateLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let first = common::create_test_file(temp_dir.path(), "first.txt", "www.\r\n\nsync\n")?;
    let second = common::create_test_file(temp_dir.path(), "second.txt", "caption")?;

    let terms = FileManager::load_terms(&[first, second])?;

    assert_eq!(terms, vec!["www.", "sync", "caption"]);
    Ok(())
}

/// A missing pattern file is reported by name
#[test]
fn test_loadTerms_withMissingFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing = temp_dir.path().join("nope.txt");

    let err = FileManager::load_terms(&[missing]).unwrap_err();

    assert!(matches!(err, PatternError::TermFileLoad { .. }));
    assert!(err.to_string().contains("nope.txt"));
    Ok(())
}

/// Files without any terms are a configuration error
#[test]
fn test_loadTerms_withOnlyBlankLines_shouldReportEmptySet() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let blank = common::create_test_file(temp_dir.path(), "blank.txt", "\n\n")?;

    let err = FileManager::load_terms(&[blank]).unwrap_err();

    assert!(matches!(err, PatternError::EmptySet));
    Ok(())
}
