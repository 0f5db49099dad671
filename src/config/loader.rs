//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::WrapperConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {var}")]
    Env { var: &'static str, value: String },

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

/// Load configuration: TOML file (if any), then environment overrides, then validation.
pub fn load_config(path: Option<&Path>) -> Result<WrapperConfig, ConfigError> {
    let config = match path {
        Some(path) => parse_file(path)?,
        None => WrapperConfig::default(),
    };

    let config = apply_env_overrides(config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn parse_file(path: &Path) -> Result<WrapperConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Overlay environment variables on top of a loaded configuration.
///
/// `lookup` resolves a variable name to its value; `load_config` passes the
/// process environment.
pub fn apply_env_overrides<F>(mut config: WrapperConfig, lookup: F) -> Result<WrapperConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(name) = lookup("SERVICE_NAME") {
        config.service.name = name;
    }
    if let Some(id) = lookup("SERVICE_ID") {
        config.service.id = Some(id);
    }
    if let Some(address) = lookup("SERVICE_ADDRESS") {
        config.service.address = Some(address);
    }
    if let Some(port) = lookup("SERVICE_PORT") {
        config.service.port = parse_port("SERVICE_PORT", port)?;
    }
    if let Some(host) = lookup("CONSUL_HOST") {
        config.consul.host = host;
    }
    if let Some(port) = lookup("CONSUL_PORT") {
        config.consul.port = parse_port("CONSUL_PORT", port)?;
    }
    if let Some(scheme) = lookup("CONSUL_SCHEME") {
        config.consul.scheme = scheme;
    }
    if let Some(token) = lookup("CONSUL_TOKEN") {
        config.consul.token = Some(token);
    }
    if let Some(prefixes) = lookup("PREFIXES") {
        config.prefixes = prefixes
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();
    }

    Ok(config)
}

fn parse_port(var: &'static str, value: String) -> Result<u16, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Env { var, value })
}
