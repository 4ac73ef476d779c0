//! Enrichment of project records with code-hosting statistics
//!
//! After scanning, each code repository a project references is asked for
//! its weekly commit activity and open issue count. Failures here never drop
//! the record; the affected field keeps its default.

use crate::links::RepoRef;
use crate::project::ProjectRecord;
use crate::ApiResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

/// One week of commit activity
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct WeeklyActivity {
    /// Commits per day, Sunday first
    #[serde(default)]
    pub days: Vec<u32>,
    /// Commits in the week
    pub total: u32,
    /// Start of the week as a Unix timestamp
    pub week: i64,
}

impl WeeklyActivity {
    /// Start of the week, if the timestamp is in range
    pub fn week_start(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.week, 0)
    }
}

impl fmt::Display for WeeklyActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let week = self
            .week_start()
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| self.week.to_string());
        let days = self
            .days
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "week of {}: {} commits [{}]", week, self.total, days)
    }
}

/// Answer to a commit-activity request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitActivity {
    /// Statistics are available; oldest week first
    Ready(Vec<WeeklyActivity>),
    /// The platform is still computing statistics; retry later
    Processing,
}

/// Source of repository statistics
#[async_trait]
pub trait StatsProvider {
    /// Fetches weekly commit activity for a repository
    async fn commit_activity(&self, repo: &RepoRef) -> ApiResult<CommitActivity>;

    /// Fetches the number of open issues of a repository
    async fn issue_count(&self, repo: &RepoRef) -> ApiResult<u64>;
}

/// Enriches `record` with statistics for every code repository it references
///
/// A "processing" commit-activity answer is retried exactly once after
/// `retry_delay`. The most recent week of the last repository processed
/// becomes the commit summary. Issue counts are summed across repositories.
///
/// # Arguments
///
/// * `record` - A scanned project record
/// * `provider` - Source of commit activity and issue counts
/// * `retry_delay` - Wait before the single commit-activity retry
///
/// # Returns
///
/// The enriched record. Failed lookups are logged and leave the affected
/// field unchanged; enrichment never drops a record.
pub async fn enrich<P>(
    mut record: ProjectRecord,
    provider: &P,
    retry_delay: Duration,
) -> ProjectRecord
where
    P: StatsProvider + ?Sized,
{
    // Collect first: the loop below mutates the record
    let repos: Vec<RepoRef> = record
        .code_urls
        .iter()
        .filter_map(|url| {
            let repo = RepoRef::from_url(url);
            if repo.is_none() {
                tracing::debug!("Skipping code URL without owner/repo: {}", url);
            }
            repo
        })
        .collect();

    for repo in repos {
        match fetch_commit_activity(provider, &repo, retry_delay).await {
            Ok(CommitActivity::Ready(weeks)) => {
                // Weeks are oldest first
                if let Some(latest) = weeks.last() {
                    record.last_commit_summary = latest.to_string();
                }
            }
            Ok(CommitActivity::Processing) => {
                tracing::warn!("Commit activity for {} still processing after retry", repo);
            }
            Err(e) => {
                tracing::warn!("Could not get commit activity for {}: {}", repo, e);
            }
        }

        // Independent of the commit-activity outcome
        match provider.issue_count(&repo).await {
            Ok(count) => record.issue_count += count,
            Err(e) => tracing::warn!("Could not get issue count for {}: {}", repo, e),
        }
    }

    record
}

async fn fetch_commit_activity<P>(
    provider: &P,
    repo: &RepoRef,
    retry_delay: Duration,
) -> ApiResult<CommitActivity>
where
    P: StatsProvider + ?Sized,
{
    match provider.commit_activity(repo).await? {
        CommitActivity::Processing => {
            tracing::debug!(
                "Commit activity for {} is processing, retrying in {:?}",
                repo,
                retry_delay
            );
            tokio::time::sleep(retry_delay).await;
            provider.commit_activity(repo).await
        }
        ready => Ok(ready),
    }
}
