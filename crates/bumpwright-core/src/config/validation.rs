//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_versioning(config)?;
    validate_analyzer(config)?;
    validate_host(config)?;
    validate_git(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> crate::error::BumpwrightError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.into(),
    }
    .into()
}

fn validate_versioning(config: &Config) -> Result<()> {
    if config.versioning.tag_prefix.chars().any(char::is_whitespace) {
        return Err(invalid(
            "versioning.tag_prefix",
            "must not contain whitespace",
        ));
    }

    if semver::Version::parse(&config.versioning.initial_version).is_err() {
        return Err(invalid(
            "versioning.initial_version",
            "must be a semantic version",
        ));
    }

    Ok(())
}

fn validate_analyzer(config: &Config) -> Result<()> {
    if !(0.0..=2.0).contains(&config.analyzer.temperature) {
        return Err(invalid(
            "analyzer.temperature",
            "must be between 0.0 and 2.0",
        ));
    }

    if config.analyzer.enabled {
        if config.analyzer.model.trim().is_empty() {
            return Err(invalid("analyzer.model", "model cannot be empty"));
        }
        url::Url::parse(&config.analyzer.api_base)
            .map_err(|e| invalid("analyzer.api_base", e.to_string()))?;
    }

    Ok(())
}

fn validate_host(config: &Config) -> Result<()> {
    if !(1..=100).contains(&config.host.page_size) {
        return Err(invalid("host.page_size", "must be between 1 and 100"));
    }

    url::Url::parse(&config.host.api_url).map_err(|e| invalid("host.api_url", e.to_string()))?;

    if let Some(repository) = &config.host.repository {
        let valid = repository
            .split_once('/')
            .is_some_and(|(owner, name)| !owner.is_empty() && !name.is_empty() && !name.contains('/'));
        if !valid {
            return Err(invalid("host.repository", "must be in owner/name form"));
        }
    }

    Ok(())
}

fn validate_git(config: &Config) -> Result<()> {
    if config.git.remote.is_empty() {
        return Err(invalid("git.remote", "remote cannot be empty"));
    }

    if !config.git.commit_message.contains("{version}") {
        return Err(invalid(
            "git.commit_message",
            "must contain {version} placeholder",
        ));
    }

    if !config.git.tag_message.contains("{version}") {
        return Err(invalid(
            "git.tag_message",
            "must contain {version} placeholder",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_tag_prefix_whitespace() {
        let mut config = Config::default();
        config.versioning.tag_prefix = "v ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_tag_prefix_allowed() {
        let mut config = Config::default();
        config.versioning.tag_prefix = String::new();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_page_size() {
        let mut config = Config::default();
        config.host.page_size = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_repository_slug() {
        let mut config = Config::default();
        config.host.repository = Some("owner/repo".to_string());
        assert!(validate_config(&config).is_ok());

        config.host.repository = Some("just-a-name".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_commit_message_placeholder() {
        let mut config = Config::default();
        config.git.commit_message = "release".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_temperature() {
        let mut config = Config::default();
        config.analyzer.temperature = 3.5;
        assert!(validate_config(&config).is_err());
    }
}
