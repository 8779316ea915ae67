use std::net::IpAddr;

use tracing::debug;
use url::{Host, Url};

use crate::error::ParseFailure;
use crate::suffix::SuffixSet;
use crate::types::ParsedDomain;

/// Split `source` into subdomain, registrable domain and public suffix.
///
/// The input is trimmed, rejected if it is an IP literal, and validated as
/// the host of a synthetic `http://` URL. The URL's host must be the whole
/// input, so ports, userinfo, paths, queries and percent-escapes are
/// rejected. Labels are then walked right to left: the public suffix is
/// the first candidate that is in `set` while its one-label-longer
/// extension is not, and that extension is the registrable domain.
///
/// Suffix entries are matched literally; `*.` and `!` rules are not expanded.
pub fn parse_domain(set: &SuffixSet, source: &str) -> Result<ParsedDomain, ParseFailure> {
    let source = source.trim();

    if source.parse::<IpAddr>().is_ok() {
        return Err(ParseFailure::IpLiteral);
    }

    let host = parse_host(source)?;
    if !host.eq_ignore_ascii_case(source) {
        debug!(source, host = %host, "input is more than a host");
        return Err(ParseFailure::InvalidHost);
    }

    let label_count = host.split('.').count();
    if label_count < 2 {
        debug!(host = %host, "rejecting single-label host");
        return Err(ParseFailure::TooFewLabels);
    }
    if host.split('.').any(str::is_empty) {
        return Err(ParseFailure::InvalidHost);
    }

    // label_count >= 2, so there is a dot
    let tld = host.rsplit('.').next().unwrap_or_default();
    if !set.contains(tld) {
        debug!(host = %host, tld, "unknown top-level suffix");
        return Err(ParseFailure::UnknownSuffix);
    }

    let (suffix, registrable) =
        find_boundary(set, &host).ok_or(ParseFailure::IsPublicSuffix)?;

    Ok(ParsedDomain {
        subdomain: subdomain_part(source, registrable).to_string(),
        registrable_domain: registrable.to_string(),
        suffix: suffix.to_string(),
    })
}

/// Validate `source` as a URL host and return the normalized domain.
fn parse_host(source: &str) -> Result<String, ParseFailure> {
    let url = Url::parse(&format!("http://{}", source)).map_err(|e| {
        debug!(source, error = %e, "host does not parse");
        ParseFailure::InvalidHost
    })?;

    match url.host() {
        Some(Host::Domain(domain)) => Ok(domain.to_string()),
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => Err(ParseFailure::IpLiteral),
        None => Err(ParseFailure::InvalidHost),
    }
}

/// Find the public suffix and registrable domain of `host`.
///
/// Returns `None` when every left extension is itself a known suffix, i.e.
/// the whole host is a public suffix.
fn find_boundary<'a>(set: &SuffixSet, host: &'a str) -> Option<(&'a str, &'a str)> {
    let mut suffix_start = host.rfind('.')? + 1;

    loop {
        let suffix = &host[suffix_start..];
        let candidate_start = host[..suffix_start - 1].rfind('.').map_or(0, |pos| pos + 1);
        let candidate = &host[candidate_start..];

        if set.contains(suffix) && !set.contains(candidate) {
            return Some((suffix, candidate));
        }
        if candidate_start == 0 {
            return None;
        }
        suffix_start = candidate_start;
    }
}

/// Labels of `source` left of the trailing `registrable`, compared ASCII
/// case-insensitively. Empty when `registrable` is the whole source.
fn subdomain_part<'a>(source: &'a str, registrable: &str) -> &'a str {
    let split = source.len().saturating_sub(registrable.len());
    match (source.get(..split), source.get(split..)) {
        (Some(head), Some(tail)) if tail.eq_ignore_ascii_case(registrable) => {
            head.strip_suffix('.').unwrap_or_default()
        }
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_set() -> SuffixSet {
        SuffixSet::from_lines(["com", "cn", "com.cn", "uk", "co.uk", "org", "*.ck", "!www.ck"])
    }

    fn parts(p: &ParsedDomain) -> (&str, &str, &str) {
        (&p.subdomain, &p.registrable_domain, &p.suffix)
    }

    #[test]
    fn test_two_labels() {
        let p = parse_domain(&test_set(), "1.com").unwrap();
        assert_eq!(parts(&p), ("", "1.com", "com"));
    }

    #[test]
    fn test_multi_label_suffix() {
        let p = parse_domain(&test_set(), "dns.1.com.cn").unwrap();
        assert_eq!(parts(&p), ("dns", "1.com.cn", "com.cn"));
    }

    #[test]
    fn test_deep_subdomain() {
        let p = parse_domain(&test_set(), "a.b.c.example.co.uk").unwrap();
        assert_eq!(parts(&p), ("a.b.c", "example.co.uk", "co.uk"));
    }

    #[test]
    fn test_unknown_suffix() {
        assert_eq!(
            parse_domain(&test_set(), "abc.com.cxxx"),
            Err(ParseFailure::UnknownSuffix)
        );
    }

    #[test]
    fn test_ip_literals() {
        let set = test_set();
        assert_eq!(parse_domain(&set, "127.0.0.1"), Err(ParseFailure::IpLiteral));
        assert_eq!(parse_domain(&set, "::1"), Err(ParseFailure::IpLiteral));
        assert_eq!(parse_domain(&set, " 10.0.0.1 "), Err(ParseFailure::IpLiteral));
        assert_eq!(parse_domain(&set, "[::1]"), Err(ParseFailure::IpLiteral));
    }

    #[test]
    fn test_single_label() {
        assert_eq!(
            parse_domain(&test_set(), "localhost"),
            Err(ParseFailure::TooFewLabels)
        );
        assert_eq!(parse_domain(&test_set(), "com"), Err(ParseFailure::TooFewLabels));
    }

    #[test]
    fn test_invalid_host() {
        let set = test_set();
        assert_eq!(parse_domain(&set, ""), Err(ParseFailure::InvalidHost));
        assert_eq!(parse_domain(&set, "   "), Err(ParseFailure::InvalidHost));
        assert_eq!(parse_domain(&set, "exa mple.com"), Err(ParseFailure::InvalidHost));
        assert_eq!(parse_domain(&set, "a..com"), Err(ParseFailure::InvalidHost));
        assert_eq!(parse_domain(&set, "example.com."), Err(ParseFailure::InvalidHost));
    }

    #[test]
    fn test_whole_host_is_suffix() {
        assert_eq!(
            parse_domain(&test_set(), "com.cn"),
            Err(ParseFailure::IsPublicSuffix)
        );
        assert_eq!(
            parse_domain(&test_set(), "co.uk"),
            Err(ParseFailure::IsPublicSuffix)
        );
    }

    #[test]
    fn test_trims_input() {
        let p = parse_domain(&test_set(), "  www.example.org\t").unwrap();
        assert_eq!(parts(&p), ("www", "example.org", "org"));
    }

    #[test]
    fn test_mixed_case_keeps_source_subdomain() {
        let p = parse_domain(&test_set(), "WWW.Example.COM").unwrap();
        assert_eq!(parts(&p), ("WWW", "example.com", "com"));
    }

    #[test]
    fn test_wildcard_entries_not_expanded() {
        // "ck" itself is not listed, only the literal "*.ck" rule
        assert_eq!(
            parse_domain(&test_set(), "www.ck"),
            Err(ParseFailure::UnknownSuffix)
        );
    }

    #[test]
    fn test_rejects_url_parts_around_host() {
        let set = test_set();
        for input in [
            "example.com:8080",
            "www.example.com:8080",
            "user@www.example.com",
            "user:pass@example.com",
            "www.example.com/x.example.com",
            "example.com/",
            "www.example.com?q",
            "www.example.com#frag",
            "www.ex%61mple.com",
        ] {
            assert_eq!(
                parse_domain(&set, input),
                Err(ParseFailure::InvalidHost),
                "{}",
                input
            );
        }
    }

    #[test]
    fn test_subdomain_is_trailing_split() {
        // "example" also appears inside the subdomain
        let p = parse_domain(&test_set(), "example.com.example.com").unwrap();
        assert_eq!(parts(&p), ("example.com", "example.com", "com"));
        assert_eq!(p.full_domain(), "example.com.example.com");
    }

    #[test]
    fn test_find_boundary() {
        let set = test_set();
        assert_eq!(find_boundary(&set, "x.1.com.cn"), Some(("com.cn", "1.com.cn")));
        assert_eq!(find_boundary(&set, "google.com"), Some(("com", "google.com")));
        assert_eq!(find_boundary(&set, "com.cn"), None);
    }

    #[test]
    fn test_subdomain_part() {
        assert_eq!(subdomain_part("dns.1.com.cn", "1.com.cn"), "dns");
        assert_eq!(subdomain_part("1.com.cn", "1.com.cn"), "");
        assert_eq!(subdomain_part("A.B.Example.com", "example.com"), "A.B");
        assert_eq!(subdomain_part("www.other.org", "example.com"), "");
    }
}
