use crate::config::types::{Config, ForumProfile, NetworkConfig, OutputConfig, RosterConfig};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_network_config(&config.network)?;
    validate_output_config(&config.output)?;
    validate_roster_config(&config.roster)?;
    validate_forums(&config.forums)?;
    Ok(())
}

/// Validates network configuration
fn validate_network_config(config: &NetworkConfig) -> Result<(), ConfigError> {
    if let Some(proxy) = &config.proxy {
        let url = Url::parse(proxy)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid proxy '{}': {}", proxy, e)))?;

        if !matches!(url.scheme(), "socks5" | "socks5h" | "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "proxy scheme must be socks5, socks5h, http or https, got '{}'",
                url.scheme()
            )));
        }
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.max_attempts == Some(0) {
        return Err(ConfigError::Validation(
            "max-attempts must be >= 1 (omit it to retry forever)".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.archive_dir.is_empty() {
        return Err(ConfigError::Validation(
            "archive-dir cannot be empty".to_string(),
        ));
    }

    if config.roster_path.is_empty() {
        return Err(ConfigError::Validation(
            "roster-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_roster_config(config: &RosterConfig) -> Result<(), ConfigError> {
    if config.per_page < 1 {
        return Err(ConfigError::Validation(format!(
            "roster per-page must be >= 1, got {}",
            config.per_page
        )));
    }
    Ok(())
}

/// Validates forum profiles: unique names and well-formed base URLs
fn validate_forums(forums: &[ForumProfile]) -> Result<(), ConfigError> {
    let mut names = HashSet::new();

    for forum in forums {
        if forum.name.is_empty() {
            return Err(ConfigError::Validation(
                "forum name cannot be empty".to_string(),
            ));
        }

        if !names.insert(forum.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate forum profile '{}'",
                forum.name
            )));
        }

        validate_base_url(&forum.base_url)?;
    }

    Ok(())
}

/// Base URLs are joined with relative page names, so they must be directories
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", base_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url '{}' must use http or https",
            base_url
        )));
    }

    if !url.path().ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "base-url '{}' must end with '/'",
            base_url
        )));
    }

    Ok(())
}
