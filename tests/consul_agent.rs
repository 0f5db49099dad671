//! Consul agent client against a mock agent.

use serde_json::json;

use service_wrapper::config::ConsulConfig;
use service_wrapper::registry::{ConsulAgent, RegistryClient, RegistryError, ServiceDescription};

mod common;

fn description() -> ServiceDescription {
    ServiceDescription {
        id: "test".into(),
        name: "test".into(),
        address: Some("10.0.0.5".into()),
        port: 80,
        tags: vec!["urlprefix-/test".into()],
    }
}

#[tokio::test]
async fn test_register_sends_description() {
    let agent = common::start_mock_agent().await;
    let client = ConsulAgent::from_config(&agent.consul_config()).unwrap();

    client.register(&description()).await.unwrap();

    let requests = agent.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].path, "/v1/agent/service/register");
    assert_eq!(requests[0].token, None);
    assert_eq!(
        requests[0].body,
        Some(json!({
            "ID": "test",
            "Name": "test",
            "Address": "10.0.0.5",
            "Port": 80,
            "Tags": ["urlprefix-/test"],
        }))
    );
}

#[tokio::test]
async fn test_deregister_by_id_with_token() {
    let agent = common::start_mock_agent().await;
    let config = ConsulConfig {
        token: Some("secret".into()),
        ..agent.consul_config()
    };
    let client = ConsulAgent::from_config(&config).unwrap();

    client.deregister("test").await.unwrap();

    let requests = agent.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].path, "/v1/agent/service/deregister/test");
    assert_eq!(requests[0].token.as_deref(), Some("secret"));
    assert_eq!(requests[0].body, None);
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let agent = common::start_mock_agent().await;
    agent.respond_with(500);
    let client = ConsulAgent::from_config(&agent.consul_config()).unwrap();

    let err = client.register(&description()).await.unwrap_err();

    match err {
        RegistryError::Status { status, .. } => assert_eq!(status, 500),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_unreachable_agent_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = ConsulConfig {
        port,
        ..ConsulConfig::default()
    };
    let client = ConsulAgent::from_config(&config).unwrap();

    let err = client.deregister("test").await.unwrap_err();
    assert!(matches!(err, RegistryError::Transport(_)));
}
