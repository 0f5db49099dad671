//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Start (wrapper.rs):
//!     Service::start(port) → store instance → "server running"
//!     → RegistryClient::register → "registered" → install signal handlers
//!
//! Terminate (wrapper.rs):
//!     Service::stop(instance) → RegistryClient::deregister
//!     → "unregistered" → quit (exit 0)
//!
//! Signals (signals.rs):
//!     SIGINT/SIGTERM/SIGUSR2 → terminate
//!
//! Any failure:
//!     kill → log error → exit 1
//! ```
//!
//! # Design Decisions
//! - Ordered startup: service first, registration second, signals last
//! - Ordered shutdown: stop serving before leaving the registry
//! - Fail fast: no retries, every failure ends the process

pub mod error;
pub mod events;
pub mod process;
pub mod service;
pub mod signals;
pub mod wrapper;

pub use error::LifecycleError;
pub use events::LifecycleEvent;
pub use process::{ExitStatus, ProcessController, SystemProcess};
pub use service::{BoxError, Service};
pub use signals::{SignalRegistrar, TerminationHandler, TerminationSignal};
pub use wrapper::{ServiceWrapper, WrapperSettings};
