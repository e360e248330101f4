//! Main REST API server for the catalog backend.
//!
//! Wires the snapshot store, the two catalogs, the session table, and the
//! REST API together, with configuration parsing and graceful shutdown.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::signal;

use catalog_api::auth::SessionStore;
use catalog_api::router::{AppState, Router};
use catalog_api::server::Server;
use catalog_core::config::CatalogConfig;
use catalog_core::snapshot::SnapshotStore;

/// Command-line arguments for the catalog server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Data directory for snapshot persistence
    #[arg(long, default_value = "./data")]
    data_dir: String,

    /// Snapshot flush interval in seconds
    #[arg(long, default_value_t = 30)]
    flush_interval_secs: u64,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    request_timeout_ms: u64,

    /// Response timeout in milliseconds
    #[arg(long, default_value_t = 10000)]
    response_timeout_ms: u64,

    /// API session lifetime in seconds
    #[arg(long, default_value_t = 600)]
    session_ttl_secs: u64,

    /// API credential as user:password (repeatable)
    #[arg(long = "credential", value_name = "USER:PASSWORD")]
    credentials: Vec<String>,
}

/// Splits repeatable `user:password` arguments into a credential table.
fn parse_credentials(raw: &[String]) -> Result<HashMap<String, String>, String> {
    let mut table = HashMap::new();
    for entry in raw {
        let (user, password) = entry
            .split_once(':')
            .ok_or_else(|| format!("Invalid credential '{}', expected user:password", entry))?;
        if user.is_empty() || password.is_empty() {
            return Err(format!("Invalid credential '{}', expected user:password", entry));
        }
        table.insert(user.to_string(), password.to_string());
    }
    Ok(table)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    let config = Arc::new(CatalogConfig {
        data_dir: PathBuf::from(&args.data_dir),
        flush_interval_secs: args.flush_interval_secs,
        request_timeout_ms: args.request_timeout_ms,
        response_timeout_ms: args.response_timeout_ms,
        session_ttl_secs: args.session_ttl_secs,
    });

    let credentials = parse_credentials(&args.credentials).map_err(|e| anyhow::anyhow!(e))?;
    if credentials.is_empty() {
        tracing::warn!("No --credential supplied; every login will be rejected");
    }

    // Load catalogs from the snapshot, if one exists
    let snapshots = Arc::new(SnapshotStore::new(&config));
    let (plants, films) = snapshots
        .load()
        .map_err(|e| anyhow::anyhow!("Failed to load snapshot: {}", e))?;
    let plants = Arc::new(plants);
    let films = Arc::new(films);

    let sessions = Arc::new(SessionStore::new(
        credentials,
        Duration::from_secs(config.session_ttl_secs),
    ));

    // Periodic snapshot flush
    let flush_snapshots = snapshots.clone();
    let flush_plants = plants.clone();
    let flush_films = films.clone();
    let flush_interval = config.flush_interval_secs;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(flush_interval.max(1)));
        ticker.tick().await; // first tick fires immediately
        loop {
            ticker.tick().await;
            if let Err(e) = flush_snapshots.save(&flush_plants, &flush_films) {
                tracing::error!("Snapshot flush failed: {}", e);
            } else {
                tracing::debug!("Snapshot flushed");
            }
        }
    });

    let state = AppState {
        plants: plants.clone(),
        films: films.clone(),
        sessions,
        config: config.clone(),
    };
    let router = Router::new(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let server = Server::new(addr, router);

    tracing::info!("Starting catalog server...");
    tracing::info!("  Host: {}", args.host);
    tracing::info!("  Port: {}", args.port);
    tracing::info!("  Data directory: {}", args.data_dir);
    tracing::info!("  Flush interval: {} s", args.flush_interval_secs);
    tracing::info!("  Session TTL: {} s", args.session_ttl_secs);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.serve().await {
            tracing::error!("Server error: {}", e);
        }
    });

    // Wait for Ctrl+C, then flush one last time
    signal::ctrl_c().await?;
    tracing::info!("Shutting down server...");
    server_handle.abort();

    if let Err(e) = snapshots.save(&plants, &films) {
        tracing::error!("Final snapshot flush failed: {}", e);
    }

    Ok(())
}
