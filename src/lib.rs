//! org-audit: membership and project reconciliation reports
//!
//! This crate pulls project metadata from an organization's code-hosting
//! repositories and member data from its payments provider and CRM, and
//! writes both out as flat CSV reports.

pub mod audit;
pub mod config;
pub mod copper;
pub mod github;
pub mod http;
pub mod links;
pub mod members;
pub mod project;
pub mod report;
pub mod stripe;

use thiserror::Error;

/// Main error type for org-audit operations
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Report error: {0}")]
    Report(#[from] report::ReportError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to list documents of {repo}: {source}")]
    DocumentListing { repo: String, source: ApiError },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),

    #[error("Missing configuration section: [{0}]")]
    MissingSection(&'static str),
}

/// Errors raised by the external API clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Returns true if the remote side answered 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Result type alias for org-audit operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for external API calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

// Re-export commonly used types
pub use config::Config;
pub use links::{classify, ClassifiedLink, LinkKind};
pub use project::{build, enrich, scan, ProjectLevel, ProjectRecord};
