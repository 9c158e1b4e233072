use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::LevelFilter;

use crate::char_fixes::CharFixes;
use crate::decoding::Decoder;
use crate::errors::{ConfigError, PatternError};
use crate::file_utils::FileManager;
use crate::patterns::{MatchMode, PatternSet};

/// Application configuration module
/// This module handles loading and validating the cleaning settings.
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Characters replaced before matching, one character to one character
    #[serde(default = "default_char_fixes")]
    pub char_fixes: BTreeMap<String, String>,

    /// Literal match terms
    #[serde(default = "default_terms")]
    pub terms: Vec<String>,

    /// Regex sources used with `--regex` when no pattern file is given
    #[serde(default = "default_regex_patterns")]
    pub regex_patterns: Vec<String>,

    /// Corrections for encoding names the detector gets wrong
    #[serde(default = "default_encoding_overrides")]
    pub encoding_overrides: BTreeMap<String, String>,

    /// Subtitle file extensions picked up from directories and arguments
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_char_fixes() -> BTreeMap<String, String> {
    // OCR turns music notes into pilcrows
    BTreeMap::from([("¶".to_string(), "♪".to_string())])
}

fn default_terms() -> Vec<String> {
    [
        "1x", "2x", "3x", "4x", "5x", "6x", "7x", "8x", "9x",
        ".com", ".net", ".org", "air date", "caption", "download",
        "subtitle", "sync", "www.", "âª",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_regex_patterns() -> Vec<String> {
    [
        "1x", "2x", "3x", "4x", "5x", "6x", "7x", "8x", "9x",
        r"(?<!\.)\.com", r"(?<!\.)\.net", r"(?<!\.)\.org", "air date", "caption", "download",
        "subtitle", "sync", r"(?<![A-Za-z0-9])www\.", "âª",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_encoding_overrides() -> BTreeMap<String, String> {
    // Cyrillic windows-1251 text is regularly detected as MacCyrillic
    BTreeMap::from([("MacCyrillic".to_string(), "windows-1251".to_string())])
}

fn default_extensions() -> Vec<String> {
    vec!["srt".to_string()]
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

impl Config {
    /// Load a JSON configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in &self.char_fixes {
            if single_char(key).is_none() || single_char(value).is_none() {
                return Err(ConfigError::InvalidCharFix {
                    key: key.clone(),
                    value: value.clone(),
                });
            }
        }

        if self.extensions.iter().all(|ext| ext.trim_start_matches('.').is_empty()) {
            return Err(ConfigError::NoExtensions);
        }

        Ok(())
    }

    /// Character fix table. Entries that are not single characters are
    /// skipped; `validate` reports them.
    pub fn char_fix_table(&self) -> CharFixes {
        CharFixes::new(
            self.char_fixes
                .iter()
                .filter_map(|(from, to)| Some((single_char(from)?, single_char(to)?))),
        )
    }

    /// Decoder using the configured encoding overrides
    pub fn decoder(&self) -> Decoder {
        Decoder::new(self.encoding_overrides.clone())
    }

    /// Build the run's pattern set.
    ///
    /// Pattern files replace the built-in lists. Without them, regex mode
    /// uses `regex_patterns` and literal mode uses `terms`.
    pub fn pattern_set(&self, mode: MatchMode, term_files: &[PathBuf]) -> Result<PatternSet, PatternError> {
        let loaded;
        let sources: &[String] = if !term_files.is_empty() {
            loaded = FileManager::load_terms(term_files)?;
            &loaded
        } else {
            match mode {
                MatchMode::Regex => &self.regex_patterns,
                MatchMode::Literal => &self.terms,
            }
        };

        PatternSet::compile(sources, mode)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            char_fixes: default_char_fixes(),
            terms: default_terms(),
            regex_patterns: default_regex_patterns(),
            encoding_overrides: default_encoding_overrides(),
            extensions: default_extensions(),
            log_level: LogLevel::default(),
        }
    }
}
