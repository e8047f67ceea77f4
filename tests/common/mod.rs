//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use h2_api_server::catalog::seed;
use h2_api_server::http::ServerError;
use h2_api_server::lifecycle::startup;
use h2_api_server::{ApiServer, Catalog, ServerConfig, Shutdown};
use tokio::task::JoinHandle;

/// A server running on an ephemeral loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
    task: JoinHandle<Result<(), ServerError>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and wait for the server task to finish.
    pub async fn stop(self) -> Result<(), ServerError> {
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), self.task)
            .await
            .expect("server did not stop in time")
            .expect("server task panicked")
    }
}

/// Start a server over the built-in catalog.
pub async fn start_server() -> TestServer {
    start_server_with(ServerConfig::default(), seed::reference()).await
}

/// Start a server with custom configuration and data.
#[allow(dead_code)]
pub async fn start_server_with(mut config: ServerConfig, catalog: Catalog) -> TestServer {
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.listener.shutdown_grace_secs = 1;

    let listener = startup::bind(&config.listener).unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    let task = tokio::spawn(ApiServer::new(config, catalog).run(listener, receiver));

    TestServer { addr, shutdown, task }
}

/// Client speaking HTTP/2 over cleartext without an upgrade.
pub fn h2_client() -> reqwest::Client {
    reqwest::Client::builder()
        .http2_prior_knowledge()
        .build()
        .unwrap()
}

/// Client limited to HTTP/1.1.
#[allow(dead_code)]
pub fn http1_client() -> reqwest::Client {
    reqwest::Client::builder().http1_only().build().unwrap()
}
