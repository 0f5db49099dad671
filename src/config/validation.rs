//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (ports non-zero, timeouts > 0)
//! - Check prefixes are absolute paths
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: WrapperConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::WrapperConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("service name must not be empty")]
    EmptyServiceName,

    #[error("service port must be non-zero")]
    ZeroServicePort,

    #[error("consul host must not be empty")]
    EmptyConsulHost,

    #[error("consul port must be non-zero")]
    ZeroConsulPort,

    #[error("unsupported consul scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("consul timeout must be greater than zero")]
    ZeroTimeout,

    #[error("prefix '{0}' must start with '/'")]
    RelativePrefix(String),
}

/// Check the configuration, collecting every problem found.
pub fn validate_config(config: &WrapperConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.service.name.trim().is_empty() {
        errors.push(ValidationError::EmptyServiceName);
    }
    if config.service.port == 0 {
        errors.push(ValidationError::ZeroServicePort);
    }
    if config.consul.host.trim().is_empty() {
        errors.push(ValidationError::EmptyConsulHost);
    }
    if config.consul.port == 0 {
        errors.push(ValidationError::ZeroConsulPort);
    }
    if !matches!(config.consul.scheme.as_str(), "http" | "https") {
        errors.push(ValidationError::UnsupportedScheme(config.consul.scheme.clone()));
    }
    if config.consul.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    for prefix in &config.prefixes {
        if !prefix.starts_with('/') {
            errors.push(ValidationError::RelativePrefix(prefix.clone()));
        }
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
    fn test_default_config_is_valid() {
        assert!(validate_config(&WrapperConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = WrapperConfig::default();
        config.service.name = " ".into();
        config.service.port = 0;
        config.consul.scheme = "ftp".into();
        config.prefixes = vec!["/ok".into(), "bad".into()];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyServiceName,
                ValidationError::ZeroServicePort,
                ValidationError::UnsupportedScheme("ftp".into()),
                ValidationError::RelativePrefix("bad".into()),
            ]
        );
    }
}
