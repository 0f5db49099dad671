//! Service registry subsystem.
//!
//! # Data Flow
//! ```text
//! WrapperConfig
//!     → types.rs (ServiceDescription: id, name, port, urlprefix- tags)
//!     → RegistryClient::register / deregister
//!     → consul.rs (PUT /v1/agent/service/register, /deregister/{id})
//! ```
//!
//! # Design Decisions
//! - The wrapper depends on the `RegistryClient` trait, never on Consul directly
//! - The Consul client is built explicitly from config; there is no implicit default
//! - One attempt per call: failures are returned, not retried

pub mod consul;
pub mod types;

use async_trait::async_trait;

pub use consul::ConsulAgent;
pub use types::{RegistryError, RegistryResult, ServiceDescription};

/// Register/deregister operations against a discovery agent.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    async fn register(&self, description: &ServiceDescription) -> RegistryResult<()>;

    async fn deregister(&self, id: &str) -> RegistryResult<()>;
}
