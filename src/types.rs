use std::fmt;

/// A host split into subdomain, registrable domain and public suffix.
///
/// `registrable_domain` is always `<label>.<suffix>`, and joining
/// `subdomain` and `registrable_domain` with a dot gives back the
/// trimmed input (up to ASCII case).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedDomain {
    /// Labels left of the registrable domain, possibly empty (e.g. "www")
    pub subdomain: String,
    /// Registrable (main) domain, e.g. "google.com"
    pub registrable_domain: String,
    /// Matched public suffix, e.g. "com"
    pub suffix: String,
}

impl ParsedDomain {
    /// Label directly left of the suffix, e.g. "google" for "google.com".
    pub fn name(&self) -> &str {
        self.registrable_domain
            .strip_suffix(self.suffix.as_str())
            .and_then(|s| s.strip_suffix('.'))
            .unwrap_or(&self.registrable_domain)
    }

    /// Whether a subdomain part is present.
    pub fn has_subdomain(&self) -> bool {
        !self.subdomain.is_empty()
    }

    /// Rebuild the full host from its parts.
    pub fn full_domain(&self) -> String {
        if self.subdomain.is_empty() {
            self.registrable_domain.clone()
        } else {
            format!("{}.{}", self.subdomain, self.registrable_domain)
        }
    }
}

impl fmt::Display for ParsedDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_domain())
    }
}
