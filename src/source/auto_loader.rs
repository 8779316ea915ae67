use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::error::{Result, SuffixError};
use crate::suffix::SuffixSet;

use super::loader::{
    load_file, verify_file, BundledSource, SuffixSource, DEFAULT_FILENAME, DEFAULT_UPDATE_INTERVAL,
};

/// Canonical online location of the public suffix list
pub const DEFAULT_ONLINE_SOURCE_URL: &str = "https://publicsuffix.org/list/public_suffix_list.dat";

/// Default download timeout
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Suffix source backed by a local cache file that is refreshed from a URL
pub struct AutoSuffixSource {
    pub path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub url: String,
    pub timeout: Duration,
    /// Cache files older than this are re-downloaded on load
    pub update_interval: Duration,

    download_lock: Mutex<()>,
}

impl AutoSuffixSource {
    /// Create a new AutoSuffixSource using the canonical URL and a cache
    /// file in the working directory
    pub fn new() -> Self {
        Self {
            path: None,
            data_dir: None,
            url: DEFAULT_ONLINE_SOURCE_URL.to_string(),
            timeout: DEFAULT_DOWNLOAD_TIMEOUT,
            update_interval: DEFAULT_UPDATE_INTERVAL,
            download_lock: Mutex::new(()),
        }
    }

    /// Set data directory
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Set explicit cache file path (overrides data directory)
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set custom download URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set download timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set update interval for checking file freshness
    /// Default is 7 days (DEFAULT_UPDATE_INTERVAL)
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }

    /// Get cache file path
    pub fn cache_path(&self) -> PathBuf {
        if let Some(ref path) = self.path {
            return path.clone();
        }

        match self.data_dir {
            Some(ref dir) => dir.join(DEFAULT_FILENAME),
            None => PathBuf::from(DEFAULT_FILENAME),
        }
    }

    /// Check if file needs download
    pub fn should_download(&self, path: &Path) -> bool {
        match fs::metadata(path) {
            Ok(meta) => {
                if meta.len() == 0 {
                    return true;
                }
                match meta.modified() {
                    Ok(mtime) => SystemTime::now()
                        .duration_since(mtime)
                        .map(|d| d > self.update_interval)
                        .unwrap_or(true),
                    Err(_) => true,
                }
            }
            Err(_) => true,
        }
    }

    /// Download the list into the cache file regardless of its freshness.
    pub fn update(&self) -> Result<()> {
        self.download(&self.cache_path(), true)
    }

    /// Download file from URL
    fn download(&self, path: &Path, force: bool) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(SuffixError::Config("download URL is empty".to_string()));
        }

        let _lock = self.download_lock.lock();

        // Double-check after acquiring lock
        if !force && !self.should_download(path) {
            return Ok(());
        }

        info!(path = %path.display(), url = %self.url, "downloading public suffix list");

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Download to temporary file
        let tmp_path = path.with_extension("tmp");

        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .build()
            .into();
        let response = agent.get(&self.url).call().map_err(|e| SuffixError::Download {
            message: format!("Download from {} failed: {}", self.url, e),
        })?;

        let mut file = fs::File::create(&tmp_path)?;
        let (_, body) = response.into_parts();
        let mut reader = body.into_reader();
        if let Err(e) = std::io::copy(&mut reader, &mut file) {
            drop(file);
            let _ = fs::remove_file(&tmp_path);
            return Err(SuffixError::Download {
                message: format!("Download from {} interrupted: {}", self.url, e),
            });
        }
        file.flush()?;
        drop(file);

        if let Err(e) = verify_file(&tmp_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(SuffixError::Download {
                message: format!("Verification failed: {}", e),
            });
        }

        // Move to final location
        fs::rename(&tmp_path, path)?;

        info!(path = %path.display(), "downloaded public suffix list");
        Ok(())
    }
}

impl Default for AutoSuffixSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SuffixSource for AutoSuffixSource {
    fn load(&self) -> Result<SuffixSet> {
        let path = self.cache_path();

        if self.should_download(&path) {
            if let Err(e) = self.download(&path, false) {
                if !path.is_file() {
                    warn!(error = %e, "download failed and no cache file, using bundled list");
                    return BundledSource.load();
                }
                warn!(error = %e, path = %path.display(), "download failed, using existing file");
            }
        }

        load_file(&path)
    }

    fn describe(&self) -> String {
        format!("{} (cached at {})", self.url, self.cache_path().display())
    }
}
