use crate::config::types::{
    Category, Config, ExtractionConfig, OutputConfig, ProviderConfig, ScoringConfig,
};
use crate::ConfigError;
use scraper::Selector;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_provider_config(&config.provider)?;
    validate_scoring_config(&config.scoring)?;
    validate_output_config(&config.output)?;
    validate_extraction_config(&config.extraction)?;
    validate_categories(&config.categories)?;
    Ok(())
}

/// Validates the job-search endpoint settings
fn validate_provider_config(config: &ProviderConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            config.base_url
        )));
    }

    if config.location.trim().is_empty() {
        return Err(ConfigError::Validation(
            "location cannot be empty".to_string(),
        ));
    }

    if config.acquire_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "acquire-timeout-secs must be >= 1, got {}",
            config.acquire_timeout_secs
        )));
    }

    if config.content_wait_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "content-wait-secs must be >= 1, got {}",
            config.content_wait_secs
        )));
    }

    Ok(())
}

fn validate_scoring_config(config: &ScoringConfig) -> Result<(), ConfigError> {
    if config.scale < 1 {
        return Err(ConfigError::Validation(format!(
            "scale must be >= 1, got {}",
            config.scale
        )));
    }
    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.snapshot_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "snapshot-path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates that every configured selector parses
fn validate_extraction_config(config: &ExtractionConfig) -> Result<(), ConfigError> {
    if config.selectors.is_empty() && !config.document_fallback {
        return Err(ConfigError::Validation(
            "extraction needs at least one selector or document-fallback = true".to_string(),
        ));
    }

    for selector in &config.selectors {
        Selector::parse(selector)
            .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {}", selector, e)))?;
    }

    Ok(())
}

/// Validates the category set
///
/// Names key the snapshot mapping, so they must be unique and non-empty.
fn validate_categories(categories: &[Category]) -> Result<(), ConfigError> {
    if categories.is_empty() {
        return Err(ConfigError::Validation(
            "at least one category is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for category in categories {
        if category.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category name cannot be empty".to_string(),
            ));
        }

        if !seen.insert(category.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category name '{}'",
                category.name
            )));
        }

        if category.query_string().is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{}' must have at least one keyword",
                category.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_categories() {
        assert!(validate_categories(&[Category::new("tech", &["developer"])]).is_ok());

        assert!(validate_categories(&[]).is_err());
        assert!(validate_categories(&[Category::new("", &["developer"])]).is_err());
        assert!(validate_categories(&[Category::new("tech", &[" ", ""])]).is_err());
        assert!(validate_categories(&[
            Category::new("tech", &["developer"]),
            Category::new("tech", &["engineer"]),
        ])
        .is_err());
    }

    #[test]
    fn test_validate_base_url() {
        let mut config = ProviderConfig::default();
        assert!(validate_provider_config(&config).is_ok());

        config.base_url = "not a url".to_string();
        assert!(matches!(
            validate_provider_config(&config),
            Err(ConfigError::InvalidUrl(_))
        ));

        config.base_url = "ftp://jobs.example.com".to_string();
        assert!(matches!(
            validate_provider_config(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_validate_timeouts() {
        let mut config = ProviderConfig::default();
        config.acquire_timeout_secs = 0;
        assert!(validate_provider_config(&config).is_err());

        let mut config = ProviderConfig::default();
        config.content_wait_secs = 0;
        assert!(validate_provider_config(&config).is_err());
    }

    #[test]
    fn test_validate_snapshot_path() {
        let config = OutputConfig {
            snapshot_path: PathBuf::new(),
        };
        assert!(matches!(
            validate_output_config(&config),
            Err(ConfigError::Validation(_))
        ));
        assert!(validate_output_config(&OutputConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_selectors() {
        let config = ExtractionConfig {
            selectors: vec!["#searchCount".to_string(), "div[[".to_string()],
            document_fallback: true,
        };
        assert!(matches!(
            validate_extraction_config(&config),
            Err(ConfigError::InvalidSelector(_))
        ));

        let config = ExtractionConfig {
            selectors: vec![],
            document_fallback: false,
        };
        assert!(validate_extraction_config(&config).is_err());
    }
}
