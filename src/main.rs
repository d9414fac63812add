//! Tenant edge server.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────────────┐
//!                       │                     TENANT EDGE                      │
//!                       │                                                      │
//!   Client Request      │  ┌─────────┐   ┌──────────────┐   ┌──────────────┐   │
//!   ────────────────────┼─▶│  http   │──▶│   tenant     │──▶│ application  │   │
//!   Host: acme.ex.com   │  │ layers  │   │   rewrite    │   │   router     │   │
//!   GET /dashboard      │  └─────────┘   └──────┬───────┘   └──────┬───────┘   │
//!                       │                       │                  │           │
//!                       │                       ▼                  ▼           │
//!                       │               ┌──────────────┐   /tenant/acme/...    │
//!                       │               │   routing    │   (internal only)     │
//!                       │               │ bypass/host/ │                       │
//!                       │               │  resolver    │                       │
//!                       │               └──────────────┘                       │
//!                       │  config (TOML, hot reload) · observability · lifecycle│
//!                       └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use tenant_edge::config::load_config;
use tenant_edge::config::watcher::ConfigWatcher;
use tenant_edge::observability::{logging, metrics};
use tenant_edge::{HttpServer, Shutdown, TenantConfig};

#[derive(Parser)]
#[command(name = "tenant-edge")]
#[command(about = "Subdomain-to-tenant routing edge", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => TenantConfig::default(),
    };

    logging::init_logging(&config.observability)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "tenant-edge starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        root_domain = %config.routing.root_domain,
        deployment_mode = ?config.routing.deployment_mode,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Keep the watcher alive for the lifetime of the server.
    let (config_updates, _watcher) = match &cli.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (updates, Some(watcher.with_current(config.clone()).run()?))
        }
        None => {
            let (_, updates) = mpsc::unbounded_channel();
            (updates, None)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
