use std::collections::BTreeMap;

// @module: Character substitutions applied before matching

/// Single-character replacement table, e.g. the pilcrow that OCR tools
/// produce in place of a music note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharFixes {
    table: BTreeMap<char, char>,
}

impl CharFixes {
    // @creates: Table from (from, to) pairs; a repeated key keeps the last value
    pub fn new<I: IntoIterator<Item = (char, char)>>(pairs: I) -> Self {
        CharFixes {
            table: pairs.into_iter().collect(),
        }
    }

    /// Replace every mapped character in a single pass.
    ///
    /// Returns the text and whether it changed. Text with nothing to fix is
    /// handed back without copying.
    pub fn normalize(&self, text: String) -> (String, bool) {
        let needs_fix = text
            .chars()
            .any(|c| self.table.get(&c).is_some_and(|&to| to != c));
        if !needs_fix {
            return (text, false);
        }

        let fixed = text
            .chars()
            .map(|c| self.table.get(&c).copied().unwrap_or(c))
            .collect();
        (fixed, true)
    }
}
