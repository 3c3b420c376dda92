//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::types::CommitCategory;

use super::types::{Config, SourceProvider};

/// Output formats accepted in configuration
pub const VALID_FORMATS: [&str; 4] = ["markdown", "md", "json", "text"];

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_notes(config)?;
    validate_source(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_notes(config: &Config) -> Result<()> {
    if !VALID_FORMATS.contains(&config.notes.format.as_str()) {
        return Err(ConfigError::InvalidValue {
            field: "notes.format".to_string(),
            message: format!("must be one of: {}", VALID_FORMATS.join(", ")),
        }
        .into());
    }

    for (field, names) in [
        ("notes.include_types", &config.notes.include_types),
        ("notes.exclude_types", &config.notes.exclude_types),
    ] {
        for name in names {
            if name.parse::<CommitCategory>().is_err() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: format!("unknown category '{}'", name),
                }
                .into());
            }
        }
    }

    Ok(())
}

fn validate_source(config: &Config) -> Result<()> {
    if config.source.timeout_secs == 0 {
        return Err(ConfigError::InvalidValue {
            field: "source.timeout_secs".to_string(),
            message: "timeout must be greater than zero".to_string(),
        }
        .into());
    }

    if config.source.github_repo.is_some() && config.source.owner_and_repo().is_none() {
        return Err(ConfigError::InvalidValue {
            field: "source.github_repo".to_string(),
            message: "must be in owner/repo form".to_string(),
        }
        .into());
    }

    if config.source.provider == SourceProvider::Github {
        if config.source.github_repo.is_none() {
            return Err(ConfigError::InvalidValue {
                field: "source.github_repo".to_string(),
                message: "required when provider is github".to_string(),
            }
            .into());
        }
        if config.source.api_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "source.api_url".to_string(),
                message: "api url cannot be empty".to_string(),
            }
            .into());
        }
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
    fn test_validate_invalid_format() {
        let mut config = Config::default();
        config.notes.format = "html".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_unknown_category() {
        let mut config = Config::default();
        config.notes.exclude_types = vec!["chore".to_string(), "perf".to_string()];
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("perf"));
    }

    #[test]
    fn test_validate_github_requires_repo() {
        let mut config = Config::default();
        config.source.provider = SourceProvider::Github;
        assert!(validate_config(&config).is_err());

        config.source.github_repo = Some("owner/repo".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.source.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }
}
