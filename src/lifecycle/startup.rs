//! Startup orchestration for `route-trie serve`.
//!
//! # Responsibilities
//! - Start metrics, then the watcher, then the listener
//! - Publish reloaded tables into the running dispatcher
//! - Tie every task to the shutdown coordinator

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::config::watcher::ConfigWatcher;
use crate::config::TableConfig;
use crate::http::HttpServer;
use crate::lifecycle::signals::spawn_signal_listener;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::routing::RouteTable;

/// Errors that abort `serve` before or while running.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid address: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("metrics setup failed: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("file watch failed: {0}")]
    Watch(#[from] notify::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serve `table` until a stop signal arrives.
///
/// With `watch_path`, edits to that file are compiled and swapped in.
pub async fn serve(
    config: TableConfig,
    table: RouteTable,
    watch_path: Option<&Path>,
) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config.server, table);

    // Keep the watcher handle alive for as long as the server runs.
    let _watcher = match watch_path {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            let handle = watcher.run()?;
            spawn_table_updates(server.routes(), updates, &shutdown);
            Some(handle)
        }
        None => None,
    };

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    spawn_signal_listener(shutdown.clone());
    server.run(listener, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Store each received table into `routes` until shutdown.
pub fn spawn_table_updates(
    routes: Arc<ArcSwap<RouteTable>>,
    mut updates: mpsc::UnboundedReceiver<RouteTable>,
    shutdown: &Shutdown,
) -> tokio::task::JoinHandle<()> {
    let mut stop = shutdown.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                update = updates.recv() => match update {
                    Some(table) => {
                        let count = table.route_count();
                        routes.store(Arc::new(table));
                        metrics::set_route_count(count);
                        tracing::info!(routes = count, "Route table swapped");
                    }
                    None => break,
                },
                _ = stop.recv() => break,
            }
        }
    })
}
