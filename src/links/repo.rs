use std::fmt;
use url::Url;

/// An `(owner, name)` reference to a repository on the code-hosting platform
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Extracts the owner and repository name from a code-hosting URL
    ///
    /// Takes the first two non-empty path segments after the host; query
    /// strings, fragments and deeper path segments are ignored. Returns
    /// `None` if the URL does not parse or has fewer than two segments.
    ///
    /// ```
    /// use org_audit::links::RepoRef;
    ///
    /// let repo = RepoRef::from_url("https://github.com/OWASP/wstg/tree/master?tab=readme").unwrap();
    /// assert_eq!(repo, RepoRef::new("OWASP", "wstg"));
    /// assert!(RepoRef::from_url("https://github.com/OWASP").is_none());
    /// ```
    pub fn from_url(raw: &str) -> Option<Self> {
        let url = Url::parse(raw.trim()).ok()?;
        let mut segments = url
            .path_segments()?
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let owner = segments.next()?;
        let name = segments.next()?;
        Some(Self::new(owner, name))
    }

    /// Canonical `https://<code_domain>/<owner>/<name>` form
    pub fn canonical_url(&self, code_domain: &str) -> String {
        format!("https://{}/{}/{}", code_domain, self.owner, self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
