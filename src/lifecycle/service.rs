//! The wrapped service capability.

use async_trait::async_trait;

/// Boxed error returned by service implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A long-running service the wrapper can start and stop.
///
/// `start` hands back an opaque `Instance`; the wrapper keeps it and passes it
/// back to `stop` on termination.
#[async_trait]
pub trait Service: Send + Sync + 'static {
    type Instance: Send + Sync + 'static;

    async fn start(&self, port: u16) -> Result<Self::Instance, BoxError>;

    async fn stop(&self, instance: &Self::Instance) -> Result<(), BoxError>;
}
