use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads, parses and validates the audit configuration at `path`
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - The validated configuration
/// * `Err(ConfigError)` - `Io` when the file cannot be read, `Parse` for
///   malformed TOML, or a validation error when a field is out of range
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use org_audit::config::load_config;
///
/// let config = load_config(Path::new("audit.toml")).unwrap();
/// println!("Repo prefix: {}", config.github.repo_prefix);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    // Optional sections stay `None`; `[http]` and `[members]` fall back to defaults
    let config: Config = toml::from_str(&content)?;

    validate(&config)?;
    Ok(config)
}

/// Computes a hex-encoded SHA-256 hash of the configuration file content
///
/// The hash is logged at startup so a report can be traced back to the
/// configuration that produced it.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 of the raw file bytes
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read(path)?;
    let digest = Sha256::digest(&content);
    Ok(hex::encode(digest))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}
