use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{LoadErrorKind, Result, SuffixError};
use crate::suffix::SuffixSet;

/// Default update interval: 7 days
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Default file name of the local suffix list cache
pub const DEFAULT_FILENAME: &str = "public_suffix_list.dat";

/// Suffix list compiled into the crate, used when no cache file exists.
pub const BUNDLED_LIST: &str = include_str!("../../data/public_suffix_list.dat");

/// Trait for producing a complete suffix set from some line source
pub trait SuffixSource: Send + Sync {
    /// Read the source to completion and build a fresh set.
    fn load(&self) -> Result<SuffixSet>;

    /// Human readable description for logs
    fn describe(&self) -> String;
}

/// In-memory line source
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    lines: Vec<String>,
}

impl MemorySource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a whole list text into lines.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

impl SuffixSource for MemorySource {
    fn load(&self) -> Result<SuffixSet> {
        Ok(SuffixSet::from_lines(&self.lines))
    }

    fn describe(&self) -> String {
        format!("memory ({} lines)", self.lines.len())
    }
}

/// Local suffix list file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SuffixSource for FileSource {
    fn load(&self) -> Result<SuffixSet> {
        load_file(&self.path)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// The list compiled into the crate
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSource;

impl SuffixSource for BundledSource {
    fn load(&self) -> Result<SuffixSet> {
        Ok(SuffixSet::from_lines(BUNDLED_LIST.lines()))
    }

    fn describe(&self) -> String {
        "bundled list".to_string()
    }
}

/// Local cache file when present, bundled list otherwise
#[derive(Debug, Clone)]
pub struct FallbackSource {
    path: PathBuf,
}

impl FallbackSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Cache file `public_suffix_list.dat` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_FILENAME))
    }
}

impl Default for FallbackSource {
    fn default() -> Self {
        Self::new(DEFAULT_FILENAME)
    }
}

impl SuffixSource for FallbackSource {
    fn load(&self) -> Result<SuffixSet> {
        if self.path.is_file() {
            debug!(path = %self.path.display(), "loading cached suffix list");
            return load_file(&self.path);
        }
        BundledSource.load()
    }

    fn describe(&self) -> String {
        if self.path.is_file() {
            format!("file {}", self.path.display())
        } else {
            BundledSource.describe()
        }
    }
}

// Helper functions

/// Read a suffix list file into a set.
pub(crate) fn load_file(path: &Path) -> Result<SuffixSet> {
    let file = fs::File::open(path).map_err(|e| {
        SuffixError::load(
            LoadErrorKind::FileError,
            format!("Failed to open {}: {}", path.display(), e),
        )
    })?;
    SuffixSet::from_reader(BufReader::new(file))
}

/// Verify a suffix list file parses to a non-empty set
pub(crate) fn verify_file(path: &Path) -> Result<()> {
    let set = load_file(path)?;
    if set.is_empty() {
        warn!(path = %path.display(), "suffix list has no entries");
        return Err(SuffixError::load(
            LoadErrorKind::InvalidData,
            format!("{} contains no suffix entries", path.display()),
        ));
    }
    Ok(())
}
