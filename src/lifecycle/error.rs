//! Lifecycle error definitions.

use thiserror::Error;

use crate::lifecycle::service::BoxError;
use crate::lifecycle::signals::TerminationSignal;
use crate::registry::RegistryError;

/// Any failure during the start or terminate sequence.
///
/// Every variant is handled the same way: logged, then the process exits non-zero.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Service failed to start: {0}")]
    Start(#[source] BoxError),

    #[error("Service failed to stop: {0}")]
    Stop(#[source] BoxError),

    #[error("Registry operation failed: {0}")]
    Registry(#[from] RegistryError),

    #[error("Service already started")]
    AlreadyStarted,

    #[error("Service was never started")]
    NotStarted,

    #[error("Failed to install {signal} handler: {source}")]
    Signal {
        signal: TerminationSignal,
        #[source]
        source: std::io::Error,
    },
}
