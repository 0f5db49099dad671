//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the wrapper.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the service wrapper.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WrapperConfig {
    /// The wrapped service (name, port, advertised address).
    pub service: ServiceConfig,

    /// Consul agent connection settings.
    pub consul: ConsulConfig,

    /// Route prefixes advertised as `urlprefix-` tags.
    pub prefixes: Vec<String>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl WrapperConfig {
    /// Registration id for the service, falling back to its name.
    pub fn service_id(&self) -> &str {
        self.service.id.as_deref().unwrap_or(&self.service.name)
    }

    /// URI the service is reachable at once running.
    pub fn service_uri(&self) -> String {
        let host = self
            .service
            .address
            .as_deref()
            .unwrap_or(&self.service.bind_host);
        format!("http://{}:{}", host, self.service.port)
    }
}

/// Wrapped service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Service name registered with the agent.
    pub name: String,

    /// Registration id (defaults to `name`).
    pub id: Option<String>,

    /// Address advertised to the agent. The agent's own address is used when unset.
    pub address: Option<String>,

    /// Host the service binds to.
    pub bind_host: String,

    /// Port the service listens on.
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "service".to_string(),
            id: None,
            address: None,
            bind_host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Consul agent connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsulConfig {
    /// Agent host.
    pub host: String,

    /// Agent HTTP port.
    pub port: u16,

    /// `http` or `https`.
    pub scheme: String,

    /// Optional ACL token.
    pub token: Option<String>,

    /// Timeout for each agent request in seconds.
    pub timeout_secs: u64,
}

impl Default for ConsulConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8500,
            scheme: "http".to_string(),
            token: None,
            timeout_secs: 5,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "service_wrapper=info,tower_http=info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
