//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use serde_json::Value;
use tenant_edge::tenant::FixedStatsProvider;
use tenant_edge::{HttpServer, Shutdown, TenantConfig};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tower::ServiceExt;

/// Server with deterministic dashboard numbers.
pub fn test_server(config: TenantConfig) -> HttpServer {
    HttpServer::with_stats_provider(config, Arc::new(FixedStatsProvider::new(1500, 420, 3.5)))
}

/// Send a GET through the full middleware stack.
#[allow(dead_code)]
pub async fn send(router: Router, host: Option<&str>, path: &str) -> Response<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(host) = host {
        builder = builder.header("Host", host);
    }
    router.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
}

/// Like `send`, decoding the JSON body.
#[allow(dead_code)]
pub async fn get_json(router: Router, host: Option<&str>, path: &str) -> (StatusCode, Value) {
    let response = send(router, host, path).await;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// A running server on an ephemeral port.
#[allow(dead_code)]
pub struct RunningServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub config_tx: mpsc::UnboundedSender<TenantConfig>,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

/// Bind 127.0.0.1:0 and run a test server in the background.
#[allow(dead_code)]
pub async fn start_server(config: TenantConfig) -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (config_tx, config_updates) = mpsc::unbounded_channel();
    let server = test_server(config);
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move { server.run(listener, config_updates, server_shutdown).await });

    RunningServer {
        addr,
        shutdown,
        config_tx,
        handle,
    }
}
