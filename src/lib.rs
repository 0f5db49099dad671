//! Service lifecycle wrapper with Consul registration.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod registry;

pub use config::WrapperConfig;
pub use lifecycle::{ServiceWrapper, WrapperSettings};
pub use registry::{ConsulAgent, RegistryClient, ServiceDescription};
