//! Consul agent client.
//!
//! # Responsibilities
//! - Register the service with the local agent
//! - Deregister it by id on shutdown
//! - Surface non-success answers as errors (no retries)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use url::Url;

use crate::config::ConsulConfig;
use crate::registry::types::{RegistryError, RegistryResult, ServiceDescription};
use crate::registry::RegistryClient;

/// Header carrying the ACL token.
pub const TOKEN_HEADER: &str = "X-Consul-Token";

/// Client for the agent's `/v1/agent/service` endpoints.
#[derive(Debug, Clone)]
pub struct ConsulAgent {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl ConsulAgent {
    /// Build a client for the agent described by `config`.
    pub fn from_config(config: &ConsulConfig) -> RegistryResult<Self> {
        let raw = format!("{}://{}:{}", config.scheme, config.host, config.port);
        let base_url = Url::parse(&raw).map_err(|source| RegistryError::InvalidUrl { url: raw, source })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
        })
    }

    /// Agent base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> RegistryResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RegistryError::Other(format!("agent URL '{}' cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn put(&self, url: Url, body: Option<&ServiceDescription>) -> RegistryResult<()> {
        let mut request = self.client.put(url.clone());
        if let Some(token) = &self.token {
            request = request.header(TOKEN_HEADER, token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        tracing::debug!(url = %url, status = %response.status(), "Agent responded");
        check_status(response).await
    }
}

async fn check_status(response: Response) -> RegistryResult<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    Err(RegistryError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl RegistryClient for ConsulAgent {
    async fn register(&self, description: &ServiceDescription) -> RegistryResult<()> {
        let url = self.endpoint(&["v1", "agent", "service", "register"])?;
        tracing::debug!(service = %description.name, id = %description.id, "Registering with agent");
        self.put(url, Some(description)).await
    }

    async fn deregister(&self, id: &str) -> RegistryResult<()> {
        let url = self.endpoint(&["v1", "agent", "service", "deregister", id])?;
        tracing::debug!(id = %id, "Deregistering from agent");
        self.put(url, None).await
    }
}
