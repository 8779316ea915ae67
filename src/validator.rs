//! Domain validator.
//!
//! Owns the active suffix set behind a swap handle. Parsing reads one
//! snapshot of the set; reloading builds a new set off to the side and
//! replaces the old one in a single pointer swap, so readers see either
//! the old or the new list, never a partial one.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::error::{ParseFailure, Result};
use crate::parser::parse_domain;
use crate::source::{AutoSuffixSource, SuffixSource};
use crate::suffix::SuffixSet;
use crate::types::ParsedDomain;

/// Splits host names against a replaceable public suffix set.
#[derive(Debug, Default)]
pub struct DomainValidator {
    suffixes: RwLock<Arc<SuffixSet>>,
}

impl DomainValidator {
    /// Create a validator over an already built set.
    pub fn new(suffixes: SuffixSet) -> Self {
        Self {
            suffixes: RwLock::new(Arc::new(suffixes)),
        }
    }

    /// Create a validator populated from `source`.
    pub fn from_source(source: &dyn SuffixSource) -> Result<Self> {
        let set = source.load()?;
        info!(source = %source.describe(), entries = set.len(), "loaded public suffix list");
        Ok(Self::new(set))
    }

    /// Create a validator from in-memory list lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(SuffixSet::from_lines(lines))
    }

    /// Split `source` into its parts, or `None` if it is not a valid domain.
    pub fn try_parse(&self, source: &str) -> Option<ParsedDomain> {
        self.parse(source).ok()
    }

    /// Split `source` into its parts, reporting why it was rejected.
    pub fn parse(&self, source: &str) -> std::result::Result<ParsedDomain, ParseFailure> {
        let snapshot = self.snapshot();
        parse_domain(&snapshot, source)
    }

    /// Check if `source` is a domain with a known public suffix.
    pub fn is_valid(&self, source: &str) -> bool {
        self.parse(source).is_ok()
    }

    /// Exact membership test against the active set.
    pub fn contains(&self, suffix: &str) -> bool {
        self.suffixes.read().contains(suffix)
    }

    /// Number of entries in the active set
    pub fn len(&self) -> usize {
        self.suffixes.read().len()
    }

    /// Check if the active set is empty
    pub fn is_empty(&self) -> bool {
        self.suffixes.read().is_empty()
    }

    /// The currently installed set.
    pub fn snapshot(&self) -> Arc<SuffixSet> {
        self.suffixes.read().clone()
    }

    /// Install `suffixes` as the active set, returning the previous one.
    pub fn replace(&self, suffixes: SuffixSet) -> Arc<SuffixSet> {
        std::mem::replace(&mut *self.suffixes.write(), Arc::new(suffixes))
    }

    /// Rebuild the set from `source` and swap it in.
    ///
    /// Returns the number of entries installed. On error the previous set
    /// stays active.
    pub fn reload(&self, source: &dyn SuffixSource) -> Result<usize> {
        let set = match source.load() {
            Ok(set) => set,
            Err(e) => {
                warn!(source = %source.describe(), error = %e, "reload failed, keeping previous list");
                return Err(e);
            }
        };

        let entries = set.len();
        self.replace(set);
        info!(source = %source.describe(), entries, "reloaded public suffix list");
        Ok(entries)
    }

    /// Rebuild the set from in-memory lines and swap it in.
    pub fn reload_lines<I, S>(&self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = SuffixSet::from_lines(lines);
        let entries = set.len();
        self.replace(set);
        entries
    }

    /// Force a download through `source`, then reload from it.
    pub fn update_online(&self, source: &AutoSuffixSource) -> Result<usize> {
        source.update()?;
        self.reload(source)
    }

    /// Async variant of [`update_online`](Self::update_online), run on the
    /// blocking thread pool.
    #[cfg(feature = "async")]
    pub async fn update_online_async(
        self: Arc<Self>,
        source: Arc<AutoSuffixSource>,
    ) -> Result<usize> {
        tokio::task::spawn_blocking(move || self.update_online(&source))
            .await
            .map_err(|e| crate::error::SuffixError::Download {
                message: format!("Update task failed: {}", e),
            })?
    }
}
