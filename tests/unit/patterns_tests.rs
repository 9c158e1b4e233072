/*!
 * Tests for literal and regex matching
 */

use anyhow::Result;
use subnuker::app_config::Config;
use subnuker::patterns::{MatchMode, PatternSet};
use subnuker::subtitle_processor::split_cells;
use crate::common::{SAMPLE_SRT, TWO_ADS_SRT};

/// Search returns the matching cell indices in ascending order
#[test]
fn test_search_withSample_shouldFindAdvertisingCell() -> Result<()> {
    let patterns = PatternSet::compile(&["www."], MatchMode::Literal)?;
    let cells = split_cells(SAMPLE_SRT)?;
    assert_eq!(patterns.search(&cells), vec![1]);
    Ok(())
}

/// A cell hit by several patterns is reported once
#[test]
fn test_search_withOverlappingPatterns_shouldNotDuplicate() -> Result<()> {
    let patterns = PatternSet::compile(&["www.", ".com", "example"], MatchMode::Literal)?;
    let cells = split_cells(SAMPLE_SRT)?;
    assert_eq!(patterns.search(&cells), vec![1]);
    Ok(())
}

/// Pattern order does not change which cells match
#[test]
fn test_search_withReorderedPatterns_shouldReturnSameIndices() -> Result<()> {
    let cells = split_cells(TWO_ADS_SRT)?;
    let forward = PatternSet::compile(&["sync", "www.", "Sync"], MatchMode::Literal)?;
    let backward = PatternSet::compile(&["Sync", "www.", "sync"], MatchMode::Literal)?;

    assert_eq!(forward.search(&cells), vec![0, 2]);
    assert_eq!(forward.search(&cells), backward.search(&cells));
    Ok(())
}

/// The default regex for `.com` ignores a doubled dot
#[test]
fn test_defaultRegex_withDotCom_shouldRespectLookbehind() -> Result<()> {
    let config = Config::default();
    let patterns = PatternSet::compile(&config.regex_patterns, MatchMode::Regex)?;

    assert!(patterns.is_match("Sub.com here"));
    assert!(!patterns.is_match("..com"));
    Ok(())
}

/// The default regex for `www.` requires a word boundary in front
#[test]
fn test_defaultRegex_withEmbeddedWww_shouldNotMatch() -> Result<()> {
    let config = Config::default();
    let patterns = PatternSet::compile(&config.regex_patterns, MatchMode::Regex)?;

    assert!(patterns.is_match("go to www.example.org"));
    assert!(!patterns.is_match("awww.. so cute"));
    Ok(())
}

/// Regex search is unanchored
#[test]
fn test_regex_isUnanchored() -> Result<()> {
    let patterns = PatternSet::compile(&[r"air\s+date"], MatchMode::Regex)?;
    assert!(patterns.is_match("Original\nair  date: 2010"));
    Ok(())
}

/// Literal terms are not interpreted as regex syntax
#[test]
fn test_literal_withRegexMetacharacters_shouldMatchVerbatim() -> Result<()> {
    let patterns = PatternSet::compile(&[".com"], MatchMode::Literal)?;
    assert!(patterns.is_match("site.com"));
    assert!(!patterns.is_match("sitexcom"));
    Ok(())
}
