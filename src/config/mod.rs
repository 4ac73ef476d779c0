//! Configuration module for org-audit
//!
//! This module handles loading, parsing, and validating the TOML configuration
//! file. The resulting [`Config`] is built once at startup and handed by
//! reference to every API client.
//!
//! # Example
//!
//! ```no_run
//! use org_audit::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("audit.toml")).unwrap();
//! println!("Auditing organization: {}", config.github.organization);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CopperConfig, GitHubConfig, HttpConfig, LinksConfig, MembersConfig, OutputConfig,
    StripeConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
