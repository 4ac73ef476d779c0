use crate::config::types::{
    Config, CopperConfig, GitHubConfig, LinksConfig, OutputConfig, StripeConfig, UserAgentConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_user_agent_config(&config.user_agent)?;
    validate_github_config(&config.github)?;
    validate_links_config(&config.links)?;
    validate_output_config(&config.output)?;

    if config.http.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "http timeout-secs must be >= 1".to_string(),
        ));
    }

    if let Some(stripe) = &config.stripe {
        validate_stripe_config(stripe)?;
    }
    if let Some(copper) = &config.copper {
        validate_copper_config(copper)?;
    }

    if config.members.org_email_domain.is_empty() {
        return Err(ConfigError::Validation(
            "org-email-domain cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.client_name.is_empty() {
        return Err(ConfigError::Validation(
            "client-name cannot be empty".to_string(),
        ));
    }

    if !config
        .client_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "client-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.client_name
        )));
    }

    validate_email(&config.contact_email)
}

fn validate_github_config(config: &GitHubConfig) -> Result<(), ConfigError> {
    validate_api_base("github api-base", &config.api_base)?;

    if config.organization.trim().is_empty() {
        return Err(ConfigError::Validation(
            "github organization cannot be empty".to_string(),
        ));
    }

    if config.repo_prefix.trim().is_empty() {
        return Err(ConfigError::Validation(
            "github repo-prefix cannot be empty".to_string(),
        ));
    }

    if config.per_page < 1 || config.per_page > 100 {
        return Err(ConfigError::Validation(format!(
            "github per-page must be between 1 and 100, got {}",
            config.per_page
        )));
    }

    Ok(())
}

fn validate_links_config(config: &LinksConfig) -> Result<(), ConfigError> {
    validate_domain_string(&config.code_domain)?;

    for pattern in &config.self_domains {
        validate_domain_pattern(pattern)?;
    }

    let site = Url::parse(&config.site_base)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid site-base: {}", e)))?;
    if site.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "site-base '{}' must use HTTPS scheme",
            config.site_base
        )));
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_stripe_config(config: &StripeConfig) -> Result<(), ConfigError> {
    validate_api_base("stripe api-base", &config.api_base)?;
    if config.secret_key.is_empty() {
        return Err(ConfigError::Validation(
            "stripe secret-key cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_copper_config(config: &CopperConfig) -> Result<(), ConfigError> {
    validate_api_base("copper api-base", &config.api_base)?;
    if config.api_key.is_empty() {
        return Err(ConfigError::Validation(
            "copper api-key cannot be empty".to_string(),
        ));
    }
    validate_email(&config.user_email)
}

fn validate_api_base(name: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", name, value, e)))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must be an HTTP(S) URL, got '{}'",
            name, value
        )));
    }
    Ok(())
}

/// Validates a domain pattern (supports wildcards)
fn validate_domain_pattern(pattern: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain pattern cannot be empty".to_string(),
        ));
    }

    match pattern.strip_prefix("*.") {
        Some(domain) => validate_domain_string(domain),
        None => validate_domain_string(pattern),
    }
}

/// Validates a domain string (without wildcard prefix)
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must contain at least one dot (e.g., 'example.org')",
            domain
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let (local, domain) = email.split_once('@').ok_or_else(|| {
        ConfigError::Validation(format!("Invalid email format: '{}'", email))
    })?;

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
