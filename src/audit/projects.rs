use crate::config::Config;
use crate::github::{ContentEntry, GitHubClient, Repository};
use crate::project::{
    build, enrich, DocumentRole, LinkRules, ProjectRecord, RepoMeta, SourceDocument,
};
use crate::{ApiError, AuditError, Result};
use reqwest::Client;
use std::time::Duration;

const INDEX_DOCUMENT: &str = "index.md";
const INFO_DOCUMENT: &str = "info.md";
const TAB_MARKER: &str = "tab_";

/// Audits every project repository of the organization
pub struct ProjectAudit {
    github: GitHubClient,
    rules: LinkRules,
    repo_prefix: String,
    site_base: String,
    retry_delay: Duration,
}

impl ProjectAudit {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            github: GitHubClient::new(http, &config.github),
            rules: LinkRules::from(&config.links),
            repo_prefix: config.github.repo_prefix.clone(),
            site_base: config.links.site_base.trim_end_matches('/').to_string(),
            retry_delay: config.github.retry_delay(),
        }
    }

    /// Builds and enriches a record for each matching repository
    ///
    /// Repositories without a readable index document are left out. Fails
    /// if the repository listing or a root directory listing fails.
    pub async fn run(&self) -> Result<Vec<ProjectRecord>> {
        let repos = self.github.matching_repos(&self.repo_prefix).await?;
        let start_time = std::time::Instant::now();
        let mut records = Vec::with_capacity(repos.len());

        for (i, repo) in repos.iter().enumerate() {
            tracing::debug!(
                "Auditing {}/{} ({}/{})",
                self.github.organization(),
                repo.name,
                i + 1,
                repos.len()
            );

            if let Some(record) = self.audit_repo(repo).await? {
                records.push(record);
            }
        }

        tracing::info!(
            "Audited {} projects ({} skipped) in {:?}",
            records.len(),
            repos.len() - records.len(),
            start_time.elapsed()
        );
        Ok(records)
    }

    async fn audit_repo(&self, repo: &Repository) -> Result<Option<ProjectRecord>> {
        let documents = match self.collect_documents(&repo.name).await? {
            Some(documents) => documents,
            None => return Ok(None),
        };

        let meta = RepoMeta {
            name: repo.name.clone(),
            website_url: format!("{}/{}", self.site_base, repo.name),
            updated_at: repo.updated_at,
        };

        let record = match build(&documents, &meta, &self.rules) {
            Some(record) => record,
            None => return Ok(None),
        };

        Ok(Some(enrich(record, &self.github, self.retry_delay).await))
    }

    /// Fetches the documents of one repository
    ///
    /// Returns `None` if the index document cannot be read.
    async fn collect_documents(&self, repo: &str) -> Result<Option<Vec<SourceDocument>>> {
        let index = match self.github.download_contents(repo, INDEX_DOCUMENT).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Skipping {}: failed to get {}: {}", repo, INDEX_DOCUMENT, e);
                return Ok(None);
            }
        };

        let mut documents = vec![SourceDocument::new(
            INDEX_DOCUMENT,
            DocumentRole::Index,
            Some(index),
        )];

        let info = self.fetch_optional(repo, INFO_DOCUMENT).await;
        documents.push(SourceDocument::new(INFO_DOCUMENT, DocumentRole::Info, info));

        let root = self
            .github
            .list_root(repo)
            .await
            .map_err(|source| AuditError::DocumentListing {
                repo: repo.to_string(),
                source,
            })?;

        for entry in root.iter().filter(|e| is_tab_document(e)) {
            let body = self.fetch_optional(repo, entry.download_path()).await;
            documents.push(SourceDocument::new(entry.name.clone(), DocumentRole::Tab, body));
        }

        Ok(Some(documents))
    }

    async fn fetch_optional(&self, repo: &str, path: &str) -> Option<String> {
        match self.github.download_contents(repo, path).await {
            Ok(body) => Some(body),
            Err(e) => {
                log_optional_failure(repo, path, &e);
                None
            }
        }
    }
}

fn is_tab_document(entry: &ContentEntry) -> bool {
    entry.is_file() && entry.name.contains(TAB_MARKER)
}

fn log_optional_failure(repo: &str, path: &str, error: &ApiError) {
    if error.is_not_found() {
        tracing::debug!("{} has no {}", repo, path);
    } else {
        tracing::warn!("Failed to get {} from {}: {}", path, repo, error);
    }
}
