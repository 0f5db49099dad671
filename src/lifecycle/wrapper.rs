//! Start/terminate orchestration.
//!
//! # Responsibilities
//! - Start the service, then register it, then install signal handlers
//! - On termination stop the service, then deregister, then exit 0
//! - Route every failure to `kill` (log, exit 1)
//!
//! # Design Decisions
//! - Fail fast: one attempt per step, no retries
//! - Steps run strictly in order; the first failure skips the rest
//! - Process exit and signal registration are injected

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use futures_util::future::BoxFuture;

use crate::config::WrapperConfig;
use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::events::LifecycleEvent;
use crate::lifecycle::process::{ExitStatus, ProcessController, SystemProcess};
use crate::lifecycle::service::Service;
use crate::lifecycle::signals::{default_registrar, SignalRegistrar, TerminationHandler, TerminationSignal};
use crate::observability::metrics;
use crate::registry::{RegistryClient, ServiceDescription};

/// Static values the wrapper needs for its sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperSettings {
    /// Port handed to `Service::start`.
    pub port: u16,
    /// URI reported once the server runs.
    pub uri: String,
    /// Payload sent to the registry.
    pub description: ServiceDescription,
}

impl WrapperSettings {
    pub fn from_config(config: &WrapperConfig) -> Self {
        Self {
            port: config.service.port,
            uri: config.service_uri(),
            description: ServiceDescription::from_config(config),
        }
    }
}

/// Runs a service with a discovery-agent registration around it.
pub struct ServiceWrapper<S: Service, R: RegistryClient> {
    service: Arc<S>,
    registry: Arc<R>,
    settings: WrapperSettings,
    instance: OnceLock<S::Instance>,
    process: Arc<dyn ProcessController>,
    signals: Arc<dyn SignalRegistrar>,
    terminating: AtomicBool,
}

impl<S, R> ServiceWrapper<S, R>
where
    S: Service,
    R: RegistryClient + 'static,
{
    /// Create a wrapper exiting the real process and listening to OS signals.
    pub fn new(service: Arc<S>, registry: Arc<R>, settings: WrapperSettings) -> Self {
        Self {
            service,
            registry,
            settings,
            instance: OnceLock::new(),
            process: Arc::new(SystemProcess),
            signals: default_registrar(),
            terminating: AtomicBool::new(false),
        }
    }

    pub fn from_config(service: Arc<S>, registry: Arc<R>, config: &WrapperConfig) -> Self {
        Self::new(service, registry, WrapperSettings::from_config(config))
    }

    /// Replace the process controller.
    pub fn with_process(mut self, process: Arc<dyn ProcessController>) -> Self {
        self.process = process;
        self
    }

    /// Replace the signal registrar.
    pub fn with_signals(mut self, signals: Arc<dyn SignalRegistrar>) -> Self {
        self.signals = signals;
        self
    }

    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }

    pub fn settings(&self) -> &WrapperSettings {
        &self.settings
    }

    /// The running instance, once `start` has succeeded.
    pub fn instance(&self) -> Option<&S::Instance> {
        self.instance.get()
    }

    /// Start the service, register it and install termination handlers.
    ///
    /// On failure the error has already been passed to [`kill`](Self::kill).
    pub async fn start(self: &Arc<Self>) -> Result<(), LifecycleError> {
        self.run_start().await.map_err(|err| self.kill(err))
    }

    async fn run_start(self: &Arc<Self>) -> Result<(), LifecycleError> {
        if self.instance.get().is_some() {
            return Err(LifecycleError::AlreadyStarted);
        }

        let instance = self
            .service
            .start(self.settings.port)
            .await
            .map_err(LifecycleError::Start)?;
        self.instance
            .set(instance)
            .map_err(|_| LifecycleError::AlreadyStarted)?;

        LifecycleEvent::ServerRunning {
            uri: self.settings.uri.clone(),
        }
        .emit();

        self.register().await?;
        LifecycleEvent::Registered {
            name: self.settings.description.name.clone(),
        }
        .emit();

        self.set_termination_handlers()
    }

    /// Stop the service, deregister it and quit.
    ///
    /// On failure the error has already been passed to [`kill`](Self::kill).
    pub async fn terminate(&self) -> Result<(), LifecycleError> {
        self.run_terminate().await.map_err(|err| self.kill(err))
    }

    async fn run_terminate(&self) -> Result<(), LifecycleError> {
        let instance = self.instance.get().ok_or(LifecycleError::NotStarted)?;

        self.service
            .stop(instance)
            .await
            .map_err(LifecycleError::Stop)?;

        self.deregister().await?;
        LifecycleEvent::Unregistered {
            name: self.settings.description.name.clone(),
        }
        .emit();

        self.quit();
        Ok(())
    }

    pub async fn register(&self) -> Result<(), LifecycleError> {
        self.registry
            .register(&self.settings.description)
            .await
            .map_err(LifecycleError::from)
    }

    pub async fn deregister(&self) -> Result<(), LifecycleError> {
        self.registry
            .deregister(&self.settings.description.id)
            .await
            .map_err(LifecycleError::from)
    }

    /// Graceful exit (code 0).
    pub fn quit(&self) {
        tracing::info!("Service was gracefully terminated.");
        self.process.exit(ExitStatus::Success);
    }

    /// Failure exit (code 1). Returns the error for callers that outlive the exit.
    pub fn kill(&self, err: LifecycleError) -> LifecycleError {
        tracing::error!(error = %err, "Service lifecycle failed");
        metrics::record_lifecycle_failure();
        self.process.exit(ExitStatus::Failure);
        err
    }

    /// Subscribe `terminate` to every termination signal.
    pub fn set_termination_handlers(self: &Arc<Self>) -> Result<(), LifecycleError> {
        tracing::info!("Setting termination handlers.");

        let handler = self.termination_handler();
        for signal in TerminationSignal::ALL {
            self.signals
                .subscribe(signal, Arc::clone(&handler))
                .map_err(|source| LifecycleError::Signal { signal, source })?;
        }
        Ok(())
    }

    fn termination_handler(self: &Arc<Self>) -> TerminationHandler {
        let wrapper = Arc::clone(self);
        Arc::new(move |signal| -> BoxFuture<'static, ()> {
            let wrapper = Arc::clone(&wrapper);
            Box::pin(async move { wrapper.on_signal(signal).await })
        })
    }

    async fn on_signal(&self, signal: TerminationSignal) {
        if self.terminating.swap(true, Ordering::SeqCst) {
            tracing::warn!(signal = %signal, "Termination already in progress, ignoring signal");
            return;
        }

        tracing::info!(signal = %signal, "Termination signal received");
        // Failures were already routed through `kill`.
        let _ = self.terminate().await;
    }
}
