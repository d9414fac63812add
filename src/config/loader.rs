//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::TenantConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides `routing.root_domain`.
pub const ROOT_DOMAIN_ENV: &str = "TENANT_EDGE_ROOT_DOMAIN";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<TenantConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, std::env::var(ROOT_DOMAIN_ENV).ok())
}

/// Parse, apply the root-domain override, then validate.
pub fn parse_config(content: &str, root_domain_override: Option<String>) -> Result<TenantConfig, ConfigError> {
    let mut config: TenantConfig = toml::from_str(content)?;

    if let Some(root) = root_domain_override.filter(|r| !r.trim().is_empty()) {
        config.routing.root_domain = root;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_override_applies() {
        let config = parse_config("[routing]\nroot_domain = \"a.test\"", Some("b.test".into())).unwrap();
        assert_eq!(config.routing.root_domain, "b.test");

        let config = parse_config("[routing]\nroot_domain = \"a.test\"", Some(" ".into())).unwrap();
        assert_eq!(config.routing.root_domain, "a.test");
    }

    #[test]
    fn test_validation_error_message() {
        let err = parse_config("[timeouts]\nrequest_secs = 0", None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation failed: timeouts.request_secs must be greater than zero"
        );
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[routing\n", None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("tenant_edge_loader_{}.toml", std::process::id()));
        fs::write(&path, "[listener]\nbind_address = \"127.0.0.1:4000\"").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:4000");

        // Cleanup
        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
