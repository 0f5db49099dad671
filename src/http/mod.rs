//! HTTP service subsystem.
//!
//! # Data Flow
//! ```text
//! ServiceWrapper::start(port)
//!     → server.rs (bind, spawn axum::serve) → HttpInstance
//! ServiceWrapper::terminate()
//!     → server.rs (signal graceful shutdown, await the server task)
//! ```

pub mod server;

pub use server::{HttpInstance, HttpService};
