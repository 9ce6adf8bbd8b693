//! REST server implementation

use super::api;
use crate::shutdown_signal;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

/// Builds the [`Router`] for all REST endpoints
pub fn router(state: api::AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(api::health))
        .route("/api/v1/airports", get(api::get_airports))
        .route("/api/v1/airports/nearest", post(api::nearest_airport))
        .route("/api/v1/airports/icao/:icao", get(api::get_airport_by_icao))
        .route("/api/v1/airports/:id", get(api::get_airport_by_id))
        .layer(cors)
        .with_state(state)
}

/// Starts the REST API server for this microservice
///
/// # Example:
/// ```no_run
/// use svc_nearest_airport::cache::memory::MemoryCache;
/// use svc_nearest_airport::nearest::NearestQueryCache;
/// use svc_nearest_airport::rest::{api::AppState, server::rest_server};
/// use svc_nearest_airport::storage::StaticAirportStore;
/// use svc_nearest_airport::Config;
/// use std::sync::Arc;
/// async fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config::default();
///     let state = AppState {
///         store: Arc::new(StaticAirportStore::bundled()?),
///         nearest: Arc::new(NearestQueryCache::new(Arc::new(MemoryCache::new()), 300)),
///     };
///     let _ = tokio::spawn(rest_server(config, state, None)).await?;
///     Ok(())
/// }
/// ```
pub async fn rest_server(
    config: crate::Config,
    state: api::AppState,
    shutdown_rx: Option<tokio::sync::oneshot::Receiver<()>>,
) -> Result<(), ()> {
    rest_info!("(rest_server) entry.");
    let rest_port = config.docker_port_rest;
    let full_rest_addr: SocketAddr = match format!("0.0.0.0:{}", rest_port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            rest_error!("(rest_server) invalid address: {:?}, exiting.", e);
            return Err(());
        }
    };

    let app = router(state);

    rest_info!("(rest_server) hosted at: {}.", full_rest_addr);
    match axum::Server::try_bind(&full_rest_addr) {
        Ok(builder) => builder
            .serve(app.into_make_service())
            .with_graceful_shutdown(shutdown_signal("rest", shutdown_rx))
            .await
            .map_err(|e| {
                rest_error!("(rest_server) could not start server: {}", e);
            }),
        Err(e) => {
            rest_error!("(rest_server) could not bind {}: {}", full_rest_addr, e);
            Err(())
        }
    }
}
