//! Audit runs
//!
//! Each run builds the shared HTTP client, walks its data source
//! sequentially and writes one timestamped CSV report into the configured
//! output directory.

mod members;
mod projects;

pub use members::MemberExport;
pub use projects::ProjectAudit;

use crate::config::Config;
use crate::http::build_http_client;
use crate::report::{assemble_members, assemble_projects, write_report};
use crate::Result;
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Runs the project audit and writes `projects_<timestamp>.csv`
///
/// # Example
///
/// ```no_run
/// use org_audit::audit::run_project_audit;
/// use org_audit::config::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let report = run_project_audit(&config).await?;
/// println!("wrote {}", report.display());
/// # Ok(())
/// # }
/// ```
pub async fn run_project_audit(config: &Config) -> Result<PathBuf> {
    tracing::info!("Performing project audit of {}", config.github.organization);

    let http = build_http_client(&config.user_agent, &config.http)?;
    let records = ProjectAudit::new(http, config).run().await?;

    let table = assemble_projects(&records);
    let path = write_report(&table, Path::new(&config.output.directory), "projects", Utc::now())?;
    Ok(path)
}

/// Runs the member export and writes `members_<timestamp>.csv`
pub async fn run_member_export(config: &Config) -> Result<PathBuf> {
    tracing::info!("Exporting members");

    let http = build_http_client(&config.user_agent, &config.http)?;
    let export = MemberExport::new(http, config)?;

    let now = Utc::now();
    let (records, _) = export.run(now).await?;

    let table = assemble_members(&records);
    let path = write_report(&table, Path::new(&config.output.directory), "members", now)?;
    Ok(path)
}
