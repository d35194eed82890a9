//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with a single fallback dispatcher
//! - Wire up middleware (request ID, tracing, timeout)
//! - Resolve every request against the active route table
//! - Serve until the shutdown coordinator fires

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::request::{request_id, UuidRequestId, X_REQUEST_ID};
use crate::http::response::Resolution;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::routing::RouteTable;

/// Application state injected into the dispatcher.
#[derive(Clone)]
pub struct AppState {
    /// Active table. Replaced wholesale on reload, never mutated.
    pub routes: Arc<ArcSwap<RouteTable>>,
}

/// HTTP dispatcher for a route table.
pub struct HttpServer {
    router: Router,
    routes: Arc<ArcSwap<RouteTable>>,
}

impl HttpServer {
    /// Create a new HTTP server serving `table`.
    pub fn new(config: &ServerConfig, table: RouteTable) -> Self {
        metrics::set_route_count(table.route_count());
        let routes = Arc::new(ArcSwap::from_pointee(table));
        let state = AppState {
            routes: routes.clone(),
        };

        Self {
            router: Self::build_router(config, state),
            routes,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.request_timeout_secs,
                    )))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
            )
    }

    /// Shared handle to the active table, for publishing reloads.
    pub fn routes(&self) -> Arc<ArcSwap<RouteTable>> {
        self.routes.clone()
    }

    /// The configured Axum router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: &Shutdown,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.routes.load().route_count(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.signalled())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolve the request against the active table and report the outcome.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let table = state.routes.load();
    let path = request.uri().path();
    let resolution = Resolution::resolve_request(&table, request.method(), path);

    tracing::debug!(
        request_id = %request_id(&request),
        method = %request.method(),
        path = %path,
        outcome = resolution.outcome(),
        "Request resolved"
    );
    metrics::record_resolution(resolution.outcome());

    resolution.into_response()
}
