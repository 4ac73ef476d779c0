use crate::project::scanner::{scan, scan_links, LinkRules};
use crate::project::{ProjectRecord, RepoMeta};

/// Role a document plays for its project; also its scan order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocumentRole {
    /// `index.md`; required
    Index,
    /// `info.md`; optional
    Info,
    /// `tab_*.md`; optional, any number
    Tab,
}

/// A named project document; `body` is `None` if it could not be read
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub name: String,
    pub role: DocumentRole,
    pub body: Option<String>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, role: DocumentRole, body: Option<String>) -> Self {
        Self {
            name: name.into(),
            role,
            body,
        }
    }
}

/// Builds a project record from its documents
///
/// Documents are scanned index first, then info, then tab documents in the
/// order given. Only the index sets the name, type and level; info and tab
/// documents contribute links. Unreadable info and tab documents are skipped.
///
/// # Arguments
///
/// * `documents` - The project's documents, in any order
/// * `repo_meta` - Metadata of the repository holding the documents
/// * `rules` - Code and self domains used to classify links
///
/// # Returns
///
/// * `Some(ProjectRecord)` - The scanned record, with repo, website URL and
///   update time taken from `repo_meta`
/// * `None` - There is no readable index document; skip this project
pub fn build(
    documents: &[SourceDocument],
    repo_meta: &RepoMeta,
    rules: &LinkRules,
) -> Option<ProjectRecord> {
    let has_index = documents
        .iter()
        .any(|d| d.role == DocumentRole::Index && d.body.is_some());
    if !has_index {
        tracing::warn!("No readable index document for {}, skipping", repo_meta.name);
        return None;
    }

    let mut ordered: Vec<&SourceDocument> = documents.iter().collect();
    ordered.sort_by_key(|d| d.role);

    let mut record = ProjectRecord::new();
    for document in ordered {
        match &document.body {
            Some(body) => {
                tracing::debug!("Scanning {}/{}", repo_meta.name, document.name);
                match document.role {
                    DocumentRole::Index => scan(body.lines(), &mut record, rules),
                    // title/type/level of other documents describe the page, not the project
                    DocumentRole::Info | DocumentRole::Tab => {
                        scan_links(body.lines(), &mut record, rules)
                    }
                }
            }
            None => tracing::debug!(
                "Skipping unreadable {} for {}",
                document.name,
                repo_meta.name
            ),
        }
    }

    record.repo = repo_meta.name.clone();
    record.website_url = repo_meta.website_url.clone();
    record.updated_at = repo_meta.updated_at;

    Some(record)
}
