//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Reject root domains and bypass prefixes the edge cannot use
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TenantConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::TenantConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("routing.root_domain must not be empty")]
    EmptyRootDomain,
    #[error("routing.root_domain {0:?} must be a bare domain (no scheme, port or path)")]
    MalformedRootDomain(String),
    #[error("routing.bypass_prefixes entry {0:?} must start with '/'")]
    RelativeBypassPrefix(String),
    #[error("{field} {value:?} is not a socket address")]
    InvalidAddress { field: &'static str, value: String },
    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,
    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &TenantConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let root = config.routing.root_domain.trim();
    if root.is_empty() {
        errors.push(ValidationError::EmptyRootDomain);
    } else if root.contains(&[':', '/', '?', '#', ' '][..]) {
        errors.push(ValidationError::MalformedRootDomain(root.to_string()));
    }

    for prefix in &config.routing.bypass_prefixes {
        if !prefix.starts_with('/') {
            errors.push(ValidationError::RelativeBypassPrefix(prefix.clone()));
        }
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(validate_config(&TenantConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = TenantConfig::default();
        config.routing.root_domain = "https://example.com".into();
        config.routing.bypass_prefixes = vec!["/api".into(), "static".into()];
        config.listener.bind_address = "nowhere".into();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::MalformedRootDomain("https://example.com".into()),
                ValidationError::RelativeBypassPrefix("static".into()),
                ValidationError::InvalidAddress {
                    field: "listener.bind_address",
                    value: "nowhere".into(),
                },
                ValidationError::ZeroTimeout,
            ]
        );
    }

    #[test]
    fn test_empty_root_domain() {
        let mut config = TenantConfig::default();
        config.routing.root_domain = "  ".into();
        assert_eq!(validate_config(&config), Err(vec![ValidationError::EmptyRootDomain]));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = TenantConfig::default();
        config.observability.metrics_address = "bad".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
