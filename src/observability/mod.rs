//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Lifecycle transitions and failures produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → whatever metrics recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
