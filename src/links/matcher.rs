/// Checks if a host matches a domain pattern
///
/// Two pattern forms are supported:
/// 1. Exact: "owasp.org" matches only "owasp.org"
/// 2. Wildcard: "*.owasp.org" matches "owasp.org" and any subdomain of it,
///    however deeply nested
///
/// Matching is case-sensitive; hosts are lower-cased before they get here.
///
/// # Arguments
///
/// * `pattern` - The domain pattern, optionally starting with "*."
/// * `candidate` - The host to check against the pattern
///
/// # Returns
///
/// * `true` - If the host matches the pattern
/// * `false` - Otherwise
///
/// # Examples
///
/// ```
/// use org_audit::links::matches_wildcard;
///
/// assert!(matches_wildcard("owasp.org", "owasp.org"));
/// assert!(!matches_wildcard("owasp.org", "cheatsheetseries.owasp.org"));
///
/// assert!(matches_wildcard("*.owasp.org", "owasp.org"));
/// assert!(matches_wildcard("*.owasp.org", "cheatsheetseries.owasp.org"));
/// assert!(!matches_wildcard("*.owasp.org", "notowasp.org"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    match pattern.strip_prefix("*.") {
        // Bare domain, or anything ending in ".<base>"
        Some(base) => {
            candidate == base
                || candidate
                    .strip_suffix(base)
                    .is_some_and(|head| head.ends_with('.'))
        }
        None => candidate == pattern,
    }
}

/// Returns true if `host` matches any of `patterns`
pub fn matches_any<S: AsRef<str>>(patterns: &[S], host: &str) -> bool {
    patterns.iter().any(|p| matches_wildcard(p.as_ref(), host))
}
