use crate::links::{ClassifiedLink, LinkKind};
use crate::project::ProjectLevel;
use chrono::{DateTime, Utc};

/// Insertion-ordered set of URLs with exact-match deduplication
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    urls: Vec<String>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `url` unless already present; returns true if it was added
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.contains(&url) {
            return false;
        }
        self.urls.push(url);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.iter().any(|u| u == url)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Joins the URLs with newlines, for a single report cell
    pub fn joined(&self) -> String {
        self.urls.join("\n")
    }
}

/// Metadata of the repository that owns a project's documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoMeta {
    /// Repository name, e.g. "www-project-juice-shop"
    pub name: String,
    /// Public website URL of the project
    pub website_url: String,
    /// Last update of the repository
    pub updated_at: Option<DateTime<Utc>>,
}

/// Everything the audit knows about one project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectRecord {
    pub name: String,
    pub project_type: String,
    pub level: Option<ProjectLevel>,
    pub repo: String,
    pub website_url: String,
    pub code_urls: LinkSet,
    pub external_links: LinkSet,
    pub last_commit_summary: String,
    pub issue_count: u64,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProjectRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a classified link into the matching set
    ///
    /// A URL already held by the other set is not added, so the two sets
    /// stay disjoint. Returns true if the URL was added.
    pub fn add_link(&mut self, link: ClassifiedLink) -> bool {
        let (target, other) = match link.kind {
            LinkKind::Code => (&mut self.code_urls, &self.external_links),
            LinkKind::External => (&mut self.external_links, &self.code_urls),
        };

        if other.contains(&link.url) {
            return false;
        }
        target.insert(link.url)
    }

    /// Report label of the level; empty when unknown
    pub fn level_label(&self) -> &'static str {
        self.level.map(|l| l.label()).unwrap_or("")
    }
}
