//! Lifecycle notifications.

use crate::observability::metrics;

/// Notable transitions of the wrapped service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The service is up and listening.
    ServerRunning { uri: String },
    /// The agent accepted the registration.
    Registered { name: String },
    /// The agent dropped the registration.
    Unregistered { name: String },
}

impl LifecycleEvent {
    /// Label used for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            LifecycleEvent::ServerRunning { .. } => "server_running",
            LifecycleEvent::Registered { .. } => "registered",
            LifecycleEvent::Unregistered { .. } => "unregistered",
        }
    }

    /// Log the event and count it.
    pub fn emit(&self) {
        match self {
            LifecycleEvent::ServerRunning { uri } => {
                tracing::info!(uri = %uri, "Server running");
            }
            LifecycleEvent::Registered { name } => {
                tracing::info!(service = %name, "Service registered");
            }
            LifecycleEvent::Unregistered { name } => {
                tracing::info!(service = %name, "Service unregistered");
            }
        }
        metrics::record_lifecycle_event(self.label());
    }
}
