//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LogFormat;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [router]
            base_path = "/app/"
            discard_stale = false

            [rendering]
            timeout_ms = 1500
            max_attempts = 3

            [observability]
            log_format = "json"

            [[pages]]
            path = "faq"
            title = "FAQ"
            content = "<h1>FAQ</h1>"
            seo = { keywords = ["help"] }
            "#,
        )
        .unwrap();

        assert_eq!(config.router.base_path, "/app/");
        assert_eq!(config.router.not_found_path, "not-found");
        assert!(!config.router.discard_stale);
        assert_eq!(config.rendering.timeout_ms, Some(1500));
        assert_eq!(config.rendering.max_attempts, 3);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.pages.len(), 1);
        assert_eq!(config.pages[0].title, "FAQ");
        assert!(!config.pages[0].requires_auth);
        assert_eq!(config.pages[0].seo["keywords"][0], "help");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.router.base_path, "/");
        assert_eq!(config.rendering.max_attempts, 1);
        assert!(config.pages.is_empty());
    }

    #[test]
    fn test_validation_errors_are_reported() {
        let err = parse_config("[rendering]\nmax_attempts = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
        assert!(err.to_string().contains("max_attempts"));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[router\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
