use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Repository as returned by the listing and repository endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,

    /// True when the repository publishes a Pages site
    #[serde(default)]
    pub has_pages: bool,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub open_issues_count: u64,
}

/// Entry of a directory listing
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    pub name: String,

    #[serde(default)]
    pub path: String,

    /// "file", "dir", "symlink" or "submodule"
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl ContentEntry {
    pub fn is_file(&self) -> bool {
        self.kind == "file"
    }

    /// Path to request the entry's contents with; falls back to the name
    /// when the listing left the path out
    pub fn download_path(&self) -> &str {
        if self.path.is_empty() {
            &self.name
        } else {
            &self.path
        }
    }
}
