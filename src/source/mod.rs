pub mod auto_loader;
pub mod loader;

pub use auto_loader::{AutoSuffixSource, DEFAULT_DOWNLOAD_TIMEOUT, DEFAULT_ONLINE_SOURCE_URL};
pub use loader::{
    BundledSource, FallbackSource, FileSource, MemorySource, SuffixSource, BUNDLED_LIST,
    DEFAULT_FILENAME, DEFAULT_UPDATE_INTERVAL,
};
