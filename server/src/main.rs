//! REST server for the nearest airport service

use log::info;
use std::sync::Arc;
use svc_nearest_airport::cache::cache_from_config;
use svc_nearest_airport::nearest::NearestQueryCache;
use svc_nearest_airport::rest::{api::AppState, server::rest_server};
use svc_nearest_airport::storage::StaticAirportStore;
use svc_nearest_airport::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Will use default config settings if no environment vars are found.
    let config = Config::try_from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration from environment: {}", e))?;

    // Try to load log configuration from the provided log file.
    // Will default to stdout debug logging if the file can not be loaded.
    if let Err(e) = load_logger_config_from_file(config.log_config.as_str()).await {
        log::error!("(main) {}", e);
    }

    info!("(main) Loading airport data.");
    let store = StaticAirportStore::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to load airport data: {}", e))?;

    let cache = cache_from_config(&config);
    let state = AppState {
        store: Arc::new(store),
        nearest: Arc::new(NearestQueryCache::new(
            cache,
            config.nearest_cache_ttl_seconds,
        )),
    };

    info!("(main) Server startup.");
    let result = tokio::spawn(rest_server(config, state, None)).await?;

    info!("(main) server shutdown.");

    // Make sure all log message are written/ displayed before shutdown
    log::logger().flush();

    result.map_err(|_| anyhow::anyhow!("REST server exited with an error"))
}
