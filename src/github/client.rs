//! GitHub REST client
//!
//! Covers the handful of endpoints the project audit needs: listing the
//! organization's repositories, reading files and the root directory of a
//! repository, and the commit-activity and repository statistics used for
//! enrichment.

use crate::config::GitHubConfig;
use crate::github::types::{ContentEntry, Repository};
use crate::http::{ensure_success, join_url, read_json, read_text, send};
use crate::links::RepoRef;
use crate::project::{CommitActivity, StatsProvider, WeeklyActivity};
use crate::ApiResult;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, LINK};
use reqwest::{Client, RequestBuilder, StatusCode};

const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw";
const API_VERSION: &str = "2022-11-28";

/// Client for one organization on the code-hosting platform
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_base: String,
    token: String,
    organization: String,
    per_page: u32,
}

impl GitHubClient {
    /// Creates a client from the shared HTTP client and the GitHub config
    pub fn new(http: Client, config: &GitHubConfig) -> Self {
        Self {
            http,
            api_base: config.api_base.clone(),
            token: config.token.clone(),
            organization: config.organization.clone(),
            per_page: config.per_page,
        }
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    fn get(&self, url: &str, media_type: &str) -> RequestBuilder {
        let request = self
            .http
            .get(url)
            .header(ACCEPT, media_type)
            .header("X-GitHub-Api-Version", API_VERSION);

        if self.token.is_empty() {
            request
        } else {
            request.bearer_auth(&self.token)
        }
    }

    /// Lists all public repositories of the organization
    ///
    /// Follows pagination until the `Link` header has no `rel="next"` entry.
    pub async fn list_org_repos(&self) -> ApiResult<Vec<Repository>> {
        let mut repos = Vec::new();
        let mut page = 1u32;

        loop {
            let url = join_url(&self.api_base, &format!("orgs/{}/repos", self.organization));
            let request = self.get(&url, JSON_MEDIA_TYPE).query(&[
                ("type", "public".to_string()),
                ("per_page", self.per_page.to_string()),
                ("page", page.to_string()),
            ]);

            let response = ensure_success(&url, send(&url, request).await?)?;
            let has_next = response
                .headers()
                .get(LINK)
                .and_then(|v| v.to_str().ok())
                .is_some_and(has_next_page);

            let batch: Vec<Repository> = read_json(&url, response).await?;
            tracing::debug!("Fetched page {} with {} repositories", page, batch.len());
            let done = batch.is_empty() || !has_next;
            repos.extend(batch);

            if done {
                break;
            }
            page += 1;
        }

        Ok(repos)
    }

    /// Lists repositories whose name contains `prefix` and that publish a Pages site
    pub async fn matching_repos(&self, prefix: &str) -> ApiResult<Vec<Repository>> {
        let repos = self.list_org_repos().await?;
        let total = repos.len();
        let matching: Vec<Repository> = repos
            .into_iter()
            .filter(|r| r.name.contains(prefix) && r.has_pages)
            .collect();

        tracing::info!(
            "{} of {} repositories in {} match '{}'",
            matching.len(),
            total,
            self.organization,
            prefix
        );
        Ok(matching)
    }

    /// Downloads the raw content of a file in one of the organization's repositories
    pub async fn download_contents(&self, repo: &str, path: &str) -> ApiResult<String> {
        let url = self.contents_url(repo, path);
        let response = send(&url, self.get(&url, RAW_MEDIA_TYPE)).await?;
        read_text(&url, ensure_success(&url, response)?).await
    }

    /// Lists the root directory of one of the organization's repositories
    pub async fn list_root(&self, repo: &str) -> ApiResult<Vec<ContentEntry>> {
        let url = self.contents_url(repo, "");
        let response = send(&url, self.get(&url, JSON_MEDIA_TYPE)).await?;
        read_json(&url, ensure_success(&url, response)?).await
    }

    /// Fetches repository metadata
    pub async fn get_repository(&self, repo: &RepoRef) -> ApiResult<Repository> {
        let url = join_url(&self.api_base, &format!("repos/{}/{}", repo.owner, repo.name));
        let response = send(&url, self.get(&url, JSON_MEDIA_TYPE)).await?;
        read_json(&url, ensure_success(&url, response)?).await
    }

    fn contents_url(&self, repo: &str, path: &str) -> String {
        join_url(
            &self.api_base,
            &format!("repos/{}/{}/contents/{}", self.organization, repo, path),
        )
    }
}

#[async_trait]
impl StatsProvider for GitHubClient {
    async fn commit_activity(&self, repo: &RepoRef) -> ApiResult<CommitActivity> {
        let url = join_url(
            &self.api_base,
            &format!("repos/{}/{}/stats/commit_activity", repo.owner, repo.name),
        );
        let response = send(&url, self.get(&url, JSON_MEDIA_TYPE)).await?;

        match response.status() {
            StatusCode::ACCEPTED => Ok(CommitActivity::Processing),
            StatusCode::NO_CONTENT => Ok(CommitActivity::Ready(Vec::new())),
            _ => {
                let response = ensure_success(&url, response)?;
                let weeks: Vec<WeeklyActivity> = read_json(&url, response).await?;
                Ok(CommitActivity::Ready(weeks))
            }
        }
    }

    async fn issue_count(&self, repo: &RepoRef) -> ApiResult<u64> {
        Ok(self.get_repository(repo).await?.open_issues_count)
    }
}

/// Returns true if a `Link` header advertises a next page
fn has_next_page(link: &str) -> bool {
    link.split(',')
        .any(|part| part.split(';').skip(1).any(|p| p.trim() == "rel=\"next\""))
}
