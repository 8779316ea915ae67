//! Domain Suffix - split host names using the Public Suffix List
//!
//! This library classifies a host name into three parts:
//! - the subdomain part (`www`)
//! - the registrable domain (`example.co.uk`)
//! - the public suffix (`co.uk`)
//!
//! Suffix data comes from a replaceable [`SuffixSet`], loaded from the
//! bundled list, a local cache file, or a remote download.
//!
//! # Example
//!
//! ```rust
//! use domain_suffix::DomainValidator;
//!
//! let validator = DomainValidator::from_lines(["com", "cn", "com.cn"]);
//!
//! let parsed = validator.try_parse("dns.1.com.cn").unwrap();
//! assert_eq!(parsed.subdomain, "dns");
//! assert_eq!(parsed.registrable_domain, "1.com.cn");
//! assert_eq!(parsed.suffix, "com.cn");
//!
//! assert!(validator.try_parse("abc.com.cxxx").is_none());
//! assert!(validator.try_parse("127.0.0.1").is_none());
//! ```
//!
//! # Matching Rules
//!
//! | Input | Registrable | Suffix | Notes |
//! |-------|-------------|--------|-------|
//! | `1.com` | `1.com` | `com` | no subdomain |
//! | `dns.1.com.cn` | `1.com.cn` | `com.cn` | longest listed suffix wins |
//! | `com.cn` | - | - | host is itself a suffix |
//! | `127.0.0.1` | - | - | IP literals are rejected |
//!
//! List lines starting with `/` are comments. Wildcard (`*.ck`) and
//! exception (`!www.ck`) rules are stored and compared as literal text.

use once_cell::sync::Lazy;
use tracing::warn;

pub mod error;
pub mod parser;
pub mod source;
pub mod suffix;
pub mod types;
pub mod validator;

// Re-export commonly used items
pub use error::{LoadErrorKind, ParseFailure, Result, SuffixError};
pub use parser::parse_domain;
pub use source::{
    AutoSuffixSource, BundledSource, FallbackSource, FileSource, MemorySource, SuffixSource,
    DEFAULT_ONLINE_SOURCE_URL, DEFAULT_UPDATE_INTERVAL,
};
pub use suffix::SuffixSet;
pub use types::ParsedDomain;
pub use validator::DomainValidator;

static GLOBAL: Lazy<DomainValidator> = Lazy::new(|| {
    let source = FallbackSource::default();
    DomainValidator::from_source(&source).unwrap_or_else(|e| {
        warn!(error = %e, "failed to load cached suffix list, using bundled list");
        DomainValidator::from_source(&BundledSource).unwrap_or_default()
    })
});

/// Process-wide validator, loaded on first use from `public_suffix_list.dat`
/// in the working directory, or from the bundled list when that file is
/// missing or unreadable.
pub fn global() -> &'static DomainValidator {
    &GLOBAL
}

/// Parse `source` with the process-wide validator.
pub fn try_parse(source: &str) -> Option<ParsedDomain> {
    global().try_parse(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_workflow() {
        let list = r#"
// ===BEGIN ICANN DOMAINS===
com
cn
com.cn
uk
co.uk

// ck : https://en.wikipedia.org/wiki/.ck
*.ck
!www.ck
// ===END ICANN DOMAINS===
"#;

        // Load the list
        let validator = DomainValidator::from_source(&MemorySource::from_text(list)).unwrap();
        assert_eq!(validator.len(), 7);

        // Plain registrable domain
        let parsed = validator.try_parse("1.com").unwrap();
        assert_eq!(parsed.subdomain, "");
        assert_eq!(parsed.registrable_domain, "1.com");
        assert_eq!(parsed.suffix, "com");

        // Multi-label suffix
        let parsed = validator.try_parse("dns.1.com.cn").unwrap();
        assert_eq!(parsed.subdomain, "dns");
        assert_eq!(parsed.registrable_domain, "1.com.cn");
        assert_eq!(parsed.suffix, "com.cn");

        // Unknown suffix
        assert!(validator.try_parse("abc.com.cxxx").is_none());

        // IP literals
        assert!(validator.try_parse("127.0.0.1").is_none());
        assert!(validator.try_parse("::1").is_none());

        // Reload swaps the whole list
        validator.reload(&MemorySource::new(["cxxx"])).unwrap();
        assert!(validator.try_parse("abc.com.cxxx").is_some());
        assert!(validator.try_parse("1.com").is_none());
    }

    #[test]
    fn test_global_validator() {
        let parsed = try_parse("www.google.com").unwrap();
        assert_eq!(parsed.registrable_domain, "google.com");
        assert_eq!(parsed.suffix, "com");
        assert!(!global().is_empty());
    }
}
