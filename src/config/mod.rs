//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overrides: SERVICE_*, CONSUL_*, PREFIXES)
//!     → validation.rs (semantic checks)
//!     → WrapperConfig (validated, immutable)
//!     → registry description + Consul client + wrapper settings
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; nothing reads the environment afterwards
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ConsulConfig, LogFormat, ObservabilityConfig, ServiceConfig, WrapperConfig};
pub use validation::ValidationError;
