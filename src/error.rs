use thiserror::Error;

/// Classifies suffix list loading errors for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// Required path or URL not configured
    NotConfigured,
    /// File open/read failure
    FileError,
    /// Data could not be decoded, or decoded to an empty list
    InvalidData,
    /// Download or verification failure
    DownloadFailed,
}

/// Suffix list error types
#[derive(Error, Debug)]
pub enum SuffixError {
    #[error("Load error: {message}")]
    Load {
        kind: LoadErrorKind,
        message: String,
    },

    #[error("Download error: {message}")]
    Download { message: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SuffixError {
    pub(crate) fn load(kind: LoadErrorKind, message: impl Into<String>) -> Self {
        SuffixError::Load {
            kind,
            message: message.into(),
        }
    }

    /// Returns the load error kind, if this is a load error.
    pub fn load_kind(&self) -> Option<LoadErrorKind> {
        match self {
            SuffixError::Load { kind, .. } => Some(*kind),
            SuffixError::Download { .. } => Some(LoadErrorKind::DownloadFailed),
            SuffixError::Io(_) => Some(LoadErrorKind::FileError),
            SuffixError::Config(_) => Some(LoadErrorKind::NotConfigured),
        }
    }
}

pub type Result<T> = std::result::Result<T, SuffixError>;

/// Reason a host string was rejected by the domain parser.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    /// Input is an IPv4 or IPv6 literal
    #[error("input is an IP address literal")]
    IpLiteral,
    /// Input does not parse as a host name
    #[error("input is not a valid host name")]
    InvalidHost,
    /// Host has a single label
    #[error("host has fewer than two labels")]
    TooFewLabels,
    /// Last label is not a known public suffix
    #[error("top-level label is not a known public suffix")]
    UnknownSuffix,
    /// Whole host is itself a public suffix, so nothing is registrable
    #[error("host is itself a public suffix")]
    IsPublicSuffix,
}
