//! token-gate
//!
//! Allow/deny checks for query strings, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request                ┌────────────────────────────────────────────┐
//!     ─────────────────────────────▶│  http server (request id, trace, limits)   │
//!                                   │        │                                   │
//!                                   │        ▼                                   │
//!                                   │  routing::ScopeTable (longest prefix)      │
//!                                   │        │                                   │
//!                                   │        ▼                                   │
//!     Client Response               │  check::evaluate (method, query, rules)    │
//!     ◀─────────────────────────────│        │                                   │
//!                                   │  config (TOML, validation, watcher)        │
//!                                   │  lifecycle (signals, shutdown)             │
//!                                   │  observability (tracing, metrics)          │
//!                                   └────────────────────────────────────────────┘
//! ```

mod cli;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use token_gate::config::{load_config, watcher::ConfigWatcher, GateConfig};
use token_gate::observability::{logging, metrics};
use token_gate::routing::ScopeTable;
use token_gate::{HttpServer, Shutdown};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GateConfig::default(),
    };

    if cli.check {
        let table = ScopeTable::from_config(&config.server)?;
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    logging::init(&config.observability.log_level);

    tracing::info!("token-gate v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_concurrent_requests = config.listener.max_concurrent_requests,
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

    // The watcher stops when this guard is dropped at the end of main.
    let (_watcher, config_updates) = match (&cli.config, cli.watch) {
        (Some(path), true) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        _ => (None, mpsc::unbounded_channel().1),
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        token_gate::lifecycle::wait_for_termination().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
