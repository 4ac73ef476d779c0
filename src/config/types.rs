use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for org-audit
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub http: HttpConfig,
    pub github: GitHubConfig,
    pub links: LinksConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub stripe: Option<StripeConfig>,
    #[serde(default)]
    pub copper: Option<CopperConfig>,
    #[serde(default)]
    pub members: MembersConfig,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the client
    #[serde(rename = "client-name")]
    pub client_name: String,

    /// Version of the client
    #[serde(rename = "client-version")]
    pub client_version: String,

    /// Email address for client-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// HTTP client tuning
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    10
}

/// Code-hosting platform configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubConfig {
    /// REST API base URL
    #[serde(rename = "api-base", default = "default_github_api")]
    pub api_base: String,

    /// API token; empty means unauthenticated requests
    #[serde(default)]
    pub token: String,

    /// Organization whose repositories are audited
    pub organization: String,

    /// Only repositories whose name contains this prefix are audited
    #[serde(rename = "repo-prefix")]
    pub repo_prefix: String,

    /// Page size for repository listings
    #[serde(rename = "per-page", default = "default_per_page")]
    pub per_page: u32,

    /// Wait before the single commit-activity retry (seconds)
    #[serde(rename = "commit-activity-retry-secs", default = "default_retry_secs")]
    pub commit_activity_retry_secs: u64,
}

impl GitHubConfig {
    /// Returns the commit-activity retry delay as a Duration
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.commit_activity_retry_secs)
    }
}

fn default_github_api() -> String {
    "https://api.github.com".to_string()
}

fn default_per_page() -> u32 {
    100
}

fn default_retry_secs() -> u64 {
    5
}

/// Link classification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LinksConfig {
    /// Host of the code-hosting platform (e.g., "github.com")
    #[serde(rename = "code-domain")]
    pub code_domain: String,

    /// The organization's own hosts (e.g., "owasp.org" or "*.owasp.org")
    #[serde(rename = "self-domains", default)]
    pub self_domains: Vec<String>,

    /// Base URL of the organization's website; project pages live under it
    #[serde(rename = "site-base")]
    pub site_base: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the CSV reports are written to
    pub directory: String,
}

/// Payments provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StripeConfig {
    #[serde(rename = "api-base", default = "default_stripe_api")]
    pub api_base: String,

    #[serde(rename = "secret-key")]
    pub secret_key: String,

    /// Customer search query selecting members
    #[serde(rename = "membership-query", default = "default_membership_query")]
    pub membership_query: String,
}

fn default_stripe_api() -> String {
    "https://api.stripe.com".to_string()
}

fn default_membership_query() -> String {
    "-metadata['membership_type']:null".to_string()
}

/// CRM configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CopperConfig {
    #[serde(rename = "api-base", default = "default_copper_api")]
    pub api_base: String,

    #[serde(rename = "api-key")]
    pub api_key: String,

    #[serde(rename = "user-email")]
    pub user_email: String,
}

fn default_copper_api() -> String {
    "https://api.copper.com/developer_api/v1".to_string()
}

/// Member export configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MembersConfig {
    /// Email domain of organization-issued addresses
    #[serde(rename = "org-email-domain", default = "default_org_email_domain")]
    pub org_email_domain: String,

    /// Customer metadata key that may carry the organization address
    #[serde(rename = "org-email-metadata-key", default = "default_org_email_key")]
    pub org_email_metadata_key: String,
}

impl Default for MembersConfig {
    fn default() -> Self {
        Self {
            org_email_domain: default_org_email_domain(),
            org_email_metadata_key: default_org_email_key(),
        }
    }
}

fn default_org_email_domain() -> String {
    "owasp.org".to_string()
}

fn default_org_email_key() -> String {
    "owasp_email".to_string()
}
