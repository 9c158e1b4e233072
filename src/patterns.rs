/*!
 * Match patterns for spotting advertising cells.
 *
 * A pattern is either a literal, case-sensitive substring or a regular
 * expression searched anywhere in the cell. Regexes are compiled with
 * `fancy_regex` so that look-around such as `(?<!\.)\.com` is available.
 */

use fancy_regex::Regex;
use log::warn;

use crate::errors::PatternError;

/// How pattern strings are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Plain substring containment
    #[default]
    Literal,
    /// Regular expression search
    Regex,
}

/// A single compiled pattern
#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(String),
    Regex(Regex),
}

impl Pattern {
    /// Compile a regex pattern
    pub fn regex(source: &str) -> Result<Self, PatternError> {
        Regex::new(source)
            .map(Pattern::Regex)
            .map_err(|e| PatternError::Compile {
                pattern: source.to_string(),
                source: Box::new(e),
            })
    }

    /// Test the pattern against a cell
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Pattern::Literal(term) => text.contains(term.as_str()),
            Pattern::Regex(re) => re.is_match(text).unwrap_or_else(|e| {
                // Runaway backtracking is reported and treated as a miss
                warn!("Regex '{}' could not be evaluated: {}", re.as_str(), e);
                false
            }),
        }
    }
}

/// Ordered, immutable set of patterns used for a whole batch
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Build a set from pattern strings, compiling them in regex mode.
    ///
    /// An empty input is rejected so a run never silently matches nothing.
    pub fn compile<S: AsRef<str>>(sources: &[S], mode: MatchMode) -> Result<Self, PatternError> {
        if sources.is_empty() {
            return Err(PatternError::EmptySet);
        }

        let patterns = match mode {
            MatchMode::Literal => sources
                .iter()
                .map(|s| Pattern::Literal(s.as_ref().to_string()))
                .collect(),
            MatchMode::Regex => sources
                .iter()
                .map(|s| Pattern::regex(s.as_ref()))
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(PatternSet { patterns })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether any pattern matches; stops at the first hit
    pub fn is_match(&self, cell: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(cell))
    }

    /// Indices of all matching cells, ascending and without duplicates
    pub fn search<S: AsRef<str>>(&self, cells: &[S]) -> Vec<usize> {
        cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| self.is_match(cell.as_ref()))
            .map(|(index, _)| index)
            .collect()
    }
}
