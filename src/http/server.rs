//! HTTP service that can be run under the wrapper.
//!
//! # Responsibilities
//! - Bind the configured host and port on start
//! - Serve a small Axum router (service name at `/`, path echo elsewhere)
//! - Drain in-flight requests and stop on `stop`

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::lifecycle::{BoxError, Service};

/// Application state injected into handlers.
#[derive(Clone)]
struct AppState {
    name: Arc<str>,
}

/// Axum-based service.
#[derive(Debug, Clone)]
pub struct HttpService {
    name: String,
    bind_host: String,
}

impl HttpService {
    pub fn new(name: impl Into<String>, bind_host: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bind_host: bind_host.into(),
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(config.name.clone(), config.bind_host.clone())
    }

    fn build_router(&self) -> Router {
        let state = AppState {
            name: Arc::from(self.name.as_str()),
        };

        Router::new()
            .route("/", get(root_handler))
            .route("/{*path}", get(echo_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }
}

async fn root_handler(State(state): State<AppState>) -> String {
    state.name.to_string()
}

async fn echo_handler(State(state): State<AppState>, Path(path): Path<String>) -> String {
    format!("{} /{}", state.name, path)
}

/// A running server.
pub struct HttpInstance {
    local_addr: SocketAddr,
    shutdown: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<std::io::Result<()>>>>,
}

impl HttpInstance {
    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

#[async_trait]
impl Service for HttpService {
    type Instance = HttpInstance;

    async fn start(&self, port: u16) -> Result<HttpInstance, BoxError> {
        let listener = TcpListener::bind((self.bind_host.as_str(), port)).await?;
        let local_addr = listener.local_addr()?;
        let (shutdown, mut stop_rx) = watch::channel(false);
        let app = self.build_router();

        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    // A dropped sender also ends the server.
                    let _ = stop_rx.wait_for(|stop| *stop).await;
                })
                .await
        });

        tracing::info!(address = %local_addr, service = %self.name, "HTTP server starting");

        Ok(HttpInstance {
            local_addr,
            shutdown,
            task: Mutex::new(Some(task)),
        })
    }

    async fn stop(&self, instance: &HttpInstance) -> Result<(), BoxError> {
        instance.shutdown.send_replace(true);

        let Some(task) = instance.task.lock().await.take() else {
            tracing::debug!(address = %instance.local_addr, "HTTP server already stopped");
            return Ok(());
        };
        task.await??;

        tracing::info!(address = %instance.local_addr, "HTTP server stopped");
        Ok(())
    }
}
