//! Registration payload and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::WrapperConfig;

/// Tag prefix understood by Fabio-style routers.
pub const URL_PREFIX_TAG: &str = "urlprefix-";

/// Service registration payload, in the Consul agent's wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceDescription {
    /// Registration id; deregistration addresses the service by this value.
    #[serde(rename = "ID")]
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    pub port: u16,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl ServiceDescription {
    /// Build the description for the configured service.
    pub fn from_config(config: &WrapperConfig) -> Self {
        Self {
            id: config.service_id().to_string(),
            name: config.service.name.clone(),
            address: config.service.address.clone(),
            port: config.service.port,
            tags: config
                .prefixes
                .iter()
                .map(|prefix| format!("{URL_PREFIX_TAG}{prefix}"))
                .collect(),
        }
    }
}

/// Errors returned by registry clients.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Agent base URL could not be built.
    #[error("Invalid agent URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Request could not be sent or the response not read.
    #[error("Agent request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Agent answered with a non-success status.
    #[error("Agent returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Any other client-specific failure.
    #[error("Registry error: {0}")]
    Other(String),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_from_config() {
        let mut config = WrapperConfig::default();
        config.service.name = "test".into();
        config.service.port = 80;
        config.prefixes = vec!["/test".into()];

        let description = ServiceDescription::from_config(&config);

        assert_eq!(description.id, "test");
        assert_eq!(description.name, "test");
        assert_eq!(description.port, 80);
        assert_eq!(description.tags, vec!["urlprefix-/test".to_string()]);
    }

    #[test]
    fn test_wire_format() {
        let description = ServiceDescription {
            id: "users-1".into(),
            name: "users".into(),
            address: None,
            port: 9000,
            tags: vec!["urlprefix-/users".into()],
        };

        let json = serde_json::to_value(&description).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ID": "users-1",
                "Name": "users",
                "Port": 9000,
                "Tags": ["urlprefix-/users"],
            })
        );
    }
}
