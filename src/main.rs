//! HTTP/2 JSON API server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ net (TCP / TLS + ALPN) ──▶ http::server (axum + tower layers)
//!                                                     │
//!                                                     ▼
//!                                              routing::ApiRouter
//!                                     (route table → handlers → ApiReply)
//!                                                     │
//!                              query ◀────────────────┼──────────▶ collection
//!                      (decode, typed options)        │     (filter, paginate, stats)
//!                                                     ▼
//!     Client Response                          catalog (immutable records)
//!     ◀────────────── http::response (JSON, CORS, no-cache headers)
//! ```
//!
//! Cross-cutting: config (TOML + env + CLI), observability (tracing,
//! metrics), lifecycle (startup, signals, graceful shutdown).

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use h2_api_server::config;
use h2_api_server::http::ApiServer;
use h2_api_server::lifecycle::{signals, startup, Shutdown};
use h2_api_server::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "h2-api-server")]
#[command(about = "HTTP/2 JSON API server over an in-memory catalog", long_about = None)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address, overriding the config file and PORT.
    #[arg(short, long)]
    bind: Option<String>,

    /// Log level used when RUST_LOG is unset.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = config::resolve(
        args.config.as_deref(),
        args.bind.as_deref(),
        args.log_level.as_deref(),
    )?;

    logging::init(&config.observability)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "h2-api-server starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        tls = config.listener.tls.is_some(),
        max_concurrent_streams = config.listener.max_concurrent_streams,
        max_concurrent_requests = config.listener.max_concurrent_requests,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_exporter(addr)?;
    }

    let catalog = startup::load_catalog(&config.data)?;
    let listener = startup::bind(&config.listener)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown);

    ApiServer::new(config, catalog)
        .run(listener, server_shutdown)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
