//! OS signal handling.
//!
//! # Responsibilities
//! - Name the fixed termination signal set (SIGINT, SIGTERM, SIGUSR2)
//! - Subscribe a handler to each signal
//! - Run the handler on every delivery
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - One listener task per signal; the handler itself decides about repeats
//! - Registration goes through `SignalRegistrar` so it can be recorded in tests

use std::fmt;
use std::sync::Arc;

use futures_util::future::BoxFuture;

/// Signals that trigger termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationSignal {
    Interrupt,
    Terminate,
    User2,
}

impl TerminationSignal {
    /// The full set the wrapper subscribes to.
    pub const ALL: [TerminationSignal; 3] = [
        TerminationSignal::Interrupt,
        TerminationSignal::Terminate,
        TerminationSignal::User2,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TerminationSignal::Interrupt => "SIGINT",
            TerminationSignal::Terminate => "SIGTERM",
            TerminationSignal::User2 => "SIGUSR2",
        }
    }

    #[cfg(unix)]
    fn kind(self) -> tokio::signal::unix::SignalKind {
        use tokio::signal::unix::SignalKind;

        match self {
            TerminationSignal::Interrupt => SignalKind::interrupt(),
            TerminationSignal::Terminate => SignalKind::terminate(),
            TerminationSignal::User2 => SignalKind::user_defined2(),
        }
    }
}

impl fmt::Display for TerminationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Callback run when a subscribed signal arrives.
pub type TerminationHandler = Arc<dyn Fn(TerminationSignal) -> BoxFuture<'static, ()> + Send + Sync>;

/// Installs handlers for termination signals.
pub trait SignalRegistrar: Send + Sync {
    fn subscribe(&self, signal: TerminationSignal, handler: TerminationHandler) -> std::io::Result<()>;
}

/// Registrar backed by `tokio::signal::unix`. Must be used inside a Tokio runtime.
#[cfg(unix)]
#[derive(Debug, Default, Clone, Copy)]
pub struct UnixSignals;

#[cfg(unix)]
impl SignalRegistrar for UnixSignals {
    fn subscribe(&self, signal: TerminationSignal, handler: TerminationHandler) -> std::io::Result<()> {
        let mut stream = tokio::signal::unix::signal(signal.kind())?;

        tokio::spawn(async move {
            while stream.recv().await.is_some() {
                handler(signal).await;
            }
        });

        tracing::debug!(signal = %signal, "Signal handler installed");
        Ok(())
    }
}

/// Fallback registrar for platforms without Unix signals: only Ctrl+C is observed.
#[cfg(not(unix))]
#[derive(Debug, Default, Clone, Copy)]
pub struct CtrlCSignals;

#[cfg(not(unix))]
impl SignalRegistrar for CtrlCSignals {
    fn subscribe(&self, signal: TerminationSignal, handler: TerminationHandler) -> std::io::Result<()> {
        if signal != TerminationSignal::Interrupt {
            tracing::warn!(signal = %signal, "Signal not supported on this platform");
            return Ok(());
        }

        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                handler(signal).await;
            }
        });
        Ok(())
    }
}

/// Registrar used when none is injected.
#[cfg(unix)]
pub fn default_registrar() -> Arc<dyn SignalRegistrar> {
    Arc::new(UnixSignals)
}

#[cfg(not(unix))]
pub fn default_registrar() -> Arc<dyn SignalRegistrar> {
    Arc::new(CtrlCSignals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn test_signal_names() {
        let names: Vec<_> = TerminationSignal::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["SIGINT", "SIGTERM", "SIGUSR2"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unix_signal_runs_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let handler: TerminationHandler = Arc::new(move |signal| -> BoxFuture<'static, ()> {
            let counter = counter.clone();
            Box::pin(async move {
                assert_eq!(signal, TerminationSignal::User2);
                counter.fetch_add(1, Ordering::SeqCst);
            })
        });

        UnixSignals.subscribe(TerminationSignal::User2, handler).unwrap();

        let status = std::process::Command::new("kill")
            .args(["-USR2", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        for _ in 0..50 {
            if calls.load(Ordering::SeqCst) > 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
