//! org-audit main entry point
//!
//! Command-line interface for the project audit and the member export.

use anyhow::Context;
use clap::Parser;
use org_audit::audit::{run_member_export, run_project_audit};
use org_audit::config::{load_config_with_hash, Config};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// org-audit: project and membership reports
///
/// By default, audits the organization's project repositories and writes a
/// projects CSV. With --members, exports current members from the payments
/// provider merged with CRM data instead.
#[derive(Parser, Debug)]
#[command(name = "org-audit")]
#[command(version = "1.0.0")]
#[command(about = "Project and membership reports", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Run the member export instead of the project audit
    #[arg(long)]
    members: bool,

    /// Validate config and show what would run without calling any API
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    if cli.dry_run {
        handle_dry_run(&config, cli.members);
        return Ok(());
    }

    let report = if cli.members {
        run_member_export(&config)
            .await
            .context("member export failed")?
    } else {
        run_project_audit(&config)
            .await
            .context("project audit failed")?
    };

    tracing::info!("Done, report written to {}", report.display());
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("org_audit=info,warn"),
            1 => EnvFilter::new("org_audit=debug,info"),
            2 => EnvFilter::new("org_audit=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Prints what a run would do
fn handle_dry_run(config: &Config, members: bool) {
    println!("=== org-audit Dry Run ===\n");

    println!("User Agent:");
    println!("  Name: {}", config.user_agent.client_name);
    println!("  Version: {}", config.user_agent.client_version);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput directory: {}", config.output.directory);

    if members {
        println!("\nMember export:");
        match &config.stripe {
            Some(stripe) => {
                println!("  Payments API: {}", stripe.api_base);
                println!("  Customer query: {}", stripe.membership_query);
            }
            None => println!("  ✗ [stripe] section missing"),
        }
        match &config.copper {
            Some(copper) => println!("  CRM API: {}", copper.api_base),
            None => println!("  ✗ [copper] section missing"),
        }
        println!("  Org email domain: {}", config.members.org_email_domain);
    } else {
        println!("\nProject audit:");
        println!("  API: {}", config.github.api_base);
        println!("  Organization: {}", config.github.organization);
        println!("  Repository prefix: {}", config.github.repo_prefix);
        println!(
            "  Commit activity retry: {}s",
            config.github.commit_activity_retry_secs
        );
        println!("  Code domain: {}", config.links.code_domain);
        println!("  Self domains ({}):", config.links.self_domains.len());
        for domain in &config.links.self_domains {
            println!("    - {}", domain);
        }
    }

    println!("\n✓ Configuration is valid");
}
