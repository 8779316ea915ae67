//! Literal public suffix set.
//!
//! Built once per load and never mutated afterwards; a reload builds a
//! fresh set and swaps it in whole.

use std::collections::HashSet;
use std::io::BufRead;

use crate::error::{LoadErrorKind, Result, SuffixError};

/// Comment marker of the public suffix list format.
const COMMENT_PREFIX: char = '/';

/// Immutable set of public suffix strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuffixSet {
    suffixes: HashSet<String>,
}

impl SuffixSet {
    /// Build a set from in-memory lines.
    ///
    /// Each line is trimmed; blank lines and lines starting with `/` are
    /// skipped, everything else is stored as-is (case preserved).
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for line in lines {
            set.insert_line(line.as_ref());
        }
        set
    }

    /// Build a set from a line reader, stopping at the first read error.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut set = Self::default();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                let kind = if e.kind() == std::io::ErrorKind::InvalidData {
                    LoadErrorKind::InvalidData
                } else {
                    LoadErrorKind::FileError
                };
                SuffixError::load(kind, format!("Failed to read line {}: {}", line_num + 1, e))
            })?;
            set.insert_line(&line);
        }
        Ok(set)
    }

    fn insert_line(&mut self, line: &str) {
        if let Some(entry) = entry_from_line(line) {
            self.suffixes.insert(entry.to_string());
        }
    }

    /// Exact, case-sensitive membership test.
    pub fn contains(&self, suffix: &str) -> bool {
        self.suffixes.contains(suffix)
    }

    /// Number of distinct entries
    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    /// Iterate over entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.suffixes.iter().map(String::as_str)
    }
}

fn entry_from_line(line: &str) -> Option<&str> {
    let entry = line.trim();
    if entry.is_empty() || entry.starts_with(COMMENT_PREFIX) {
        None
    } else {
        Some(entry)
    }
}
