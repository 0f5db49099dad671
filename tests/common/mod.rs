//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use tokio::net::TcpListener;

use service_wrapper::config::ConsulConfig;
use service_wrapper::lifecycle::{
    ExitStatus, ProcessController, SignalRegistrar, TerminationHandler, TerminationSignal,
};

/// A request observed by the mock agent.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentRequest {
    pub method: String,
    pub path: String,
    pub token: Option<String>,
    pub body: Option<serde_json::Value>,
}

/// In-process stand-in for a Consul agent that records every request.
#[derive(Clone)]
pub struct MockAgent {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<AgentRequest>>>,
    status: Arc<AtomicU16>,
}

#[allow(dead_code)]
impl MockAgent {
    pub fn requests(&self) -> Vec<AgentRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Status code returned for every subsequent request.
    pub fn respond_with(&self, status: u16) {
        self.status.store(status, Ordering::SeqCst);
    }

    pub fn consul_config(&self) -> ConsulConfig {
        ConsulConfig {
            host: self.addr.ip().to_string(),
            port: self.addr.port(),
            ..ConsulConfig::default()
        }
    }
}

/// Start a mock agent on an ephemeral port.
pub async fn start_mock_agent() -> MockAgent {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let agent = MockAgent {
        addr: listener.local_addr().unwrap(),
        requests: Arc::default(),
        status: Arc::new(AtomicU16::new(200)),
    };

    let app = Router::new().fallback(record).with_state(agent.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    agent
}

async fn record(
    State(agent): State<MockAgent>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    let request = AgentRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        token: headers
            .get("x-consul-token")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body: serde_json::from_str(&body).ok(),
    };
    agent.requests.lock().unwrap().push(request);

    StatusCode::from_u16(agent.status.load(Ordering::SeqCst)).unwrap()
}

/// Process controller that records exits instead of ending the test.
#[derive(Default)]
pub struct RecordingProcess {
    exits: Mutex<Vec<ExitStatus>>,
}

#[allow(dead_code)]
impl RecordingProcess {
    pub fn exits(&self) -> Vec<ExitStatus> {
        self.exits.lock().unwrap().clone()
    }
}

impl ProcessController for RecordingProcess {
    fn exit(&self, status: ExitStatus) {
        self.exits.lock().unwrap().push(status);
    }
}

/// Signal registrar that keeps handlers so tests can fire them.
#[derive(Default)]
pub struct RecordingSignals {
    handlers: Mutex<Vec<(TerminationSignal, TerminationHandler)>>,
}

#[allow(dead_code)]
impl RecordingSignals {
    pub fn subscribed(&self) -> Vec<TerminationSignal> {
        self.handlers.lock().unwrap().iter().map(|(s, _)| *s).collect()
    }

    /// Run the handler subscribed to `signal`.
    pub async fn fire(&self, signal: TerminationSignal) {
        let handler = self
            .handlers
            .lock()
            .unwrap()
            .iter()
            .find(|(s, _)| *s == signal)
            .map(|(_, h)| h.clone())
            .expect("no handler subscribed");
        handler(signal).await;
    }
}

impl SignalRegistrar for RecordingSignals {
    fn subscribe(&self, signal: TerminationSignal, handler: TerminationHandler) -> std::io::Result<()> {
        self.handlers.lock().unwrap().push((signal, handler));
        Ok(())
    }
}
