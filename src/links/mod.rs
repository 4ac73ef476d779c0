//! Link extraction and classification
//!
//! This module turns a raw line of project documentation into categorized
//! URLs: references to repositories on the code-hosting platform, and
//! external links. URLs pointing at the organization's own hosts are dropped.

mod matcher;
mod repo;
mod tokenizer;

pub use matcher::{matches_any, matches_wildcard};
pub use repo::RepoRef;
pub use tokenizer::{tokenize, UrlTokens, SCHEME_PREFIX};

use url::Url;

/// Which bucket a URL belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// Points at the code-hosting platform
    Code,
    /// Any other absolute URL
    External,
}

/// A URL extracted from a line together with its classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLink {
    pub url: String,
    pub kind: LinkKind,
}

impl ClassifiedLink {
    fn new(url: String, kind: LinkKind) -> Self {
        Self { url, kind }
    }
}

/// Classifies every `https://` URL found in `line`
///
/// - Code-domain URLs are normalized to `https://<code_domain>/<owner>/<repo>`;
///   if no owner/repo pair can be extracted the raw URL is kept.
/// - URLs whose host matches one of `self_domains` are dropped, unless the
///   host is the code domain itself.
/// - Everything else is an external link, kept verbatim.
///
/// A URL is reported at most once per call. Tokens that do not parse as a
/// URL with a host are skipped.
///
/// # Arguments
///
/// * `line` - One line of document text
/// * `self_domains` - The organization's own host patterns (exact or `*.domain`)
/// * `code_domain` - Lower-cased host of the code-hosting platform
///
/// # Returns
///
/// The classified links in order of appearance; empty when the line has no
/// `https://` URL.
///
/// # Examples
///
/// ```
/// use org_audit::links::{classify, LinkKind};
///
/// let links = classify(
///     "check https://github.com/owasp/repo1) and https://example.com/x,",
///     &["owasp.org"],
///     "github.com",
/// );
/// assert_eq!(links.len(), 2);
/// assert_eq!(links[0].url, "https://github.com/owasp/repo1");
/// assert_eq!(links[0].kind, LinkKind::Code);
/// assert_eq!(links[1].url, "https://example.com/x");
/// assert_eq!(links[1].kind, LinkKind::External);
/// ```
pub fn classify<S: AsRef<str>>(
    line: &str,
    self_domains: &[S],
    code_domain: &str,
) -> Vec<ClassifiedLink> {
    let mut links: Vec<ClassifiedLink> = Vec::new();

    for token in tokenize(line) {
        let Some(link) = classify_token(token, self_domains, code_domain) else {
            continue;
        };

        if !links.iter().any(|l| l.url == link.url) {
            links.push(link);
        }
    }

    links
}

fn classify_token<S: AsRef<str>>(
    token: String,
    self_domains: &[S],
    code_domain: &str,
) -> Option<ClassifiedLink> {
    let host = match Url::parse(&token) {
        Ok(url) => url.host_str()?.to_lowercase(),
        Err(e) => {
            tracing::trace!("Skipping unparseable URL token {}: {}", token, e);
            return None;
        }
    };

    // Code domain first: it may also match a self-domain wildcard
    if host == code_domain {
        let url = match RepoRef::from_url(&token) {
            Some(repo) => repo.canonical_url(code_domain),
            None => token,
        };
        return Some(ClassifiedLink::new(url, LinkKind::Code));
    }

    // Links back to the organization's own site are not reported
    if matches_any(self_domains, &host) {
        return None;
    }

    Some(ClassifiedLink::new(token, LinkKind::External))
}
