//! Metrics collection and exposition.
//!
//! # Metrics
//! - `route_resolutions_total` (counter): resolutions by outcome
//! - `route_table_reloads_total` (counter): reload attempts by result
//! - `route_table_routes` (gauge): routes in the active table

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder with an HTTP scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

/// Count one request resolution.
pub fn record_resolution(outcome: &'static str) {
    ::metrics::counter!("route_resolutions_total", "outcome" => outcome).increment(1);
}

/// Count one reload attempt.
pub fn record_reload(success: bool) {
    let result = if success { "success" } else { "failure" };
    ::metrics::counter!("route_table_reloads_total", "result" => result).increment(1);
}

/// Publish the size of the active table.
pub fn set_route_count(routes: usize) {
    ::metrics::gauge!("route_table_routes").set(routes as f64);
}
