//! Halloween route HTTP server binary.
//!
//! Loads configuration, builds the house repository and the map quota
//! gatekeeper, and serves the REST API.
//!
//! # Usage
//!
//! ```bash
//! # Embedded house seed, map quota checks disabled (fail open)
//! cargo run --bin halloween-server
//!
//! # With usage credentials and a custom house file
//! MAPBOX_SECRET_TOKEN=sk... MAPBOX_USAGE_TOKEN_ID=tk... \
//! HOUSES_PATH=./houses.json cargo run --bin halloween-server
//! ```
//!
//! See [`halloween_route::config`] for every variable. `RUST_LOG` takes
//! tracing filter directives such as `halloween_route=debug` (default: info).

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use halloween_route::config::AppConfig;
use halloween_route::db::RepositoryFactory;
use halloween_route::http::{create_router, AppState};
use halloween_route::services::{AvailabilityCache, MapQuotaGatekeeper};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(log_filter(env::var("RUST_LOG").ok().as_deref()))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Halloween route server");

    let config = AppConfig::load()?;
    let venue_offset = config.venues.offset()?;

    let repository = RepositoryFactory::from_settings(&config.venues)?;
    info!("Repository initialized successfully");

    let gatekeeper = MapQuotaGatekeeper::from_settings(config.map.clone())?;
    let availability = Arc::new(AvailabilityCache::new(Arc::new(gatekeeper)));

    let state = AppState::new(repository, availability, venue_offset);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Filter from `RUST_LOG` directives, or `info` when unset or unparsable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

const DEFAULT_LOG_FILTER: &str = "info";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_accepts_target_directives() {
        let filter = log_filter(Some("halloween_route=debug"));
        assert_eq!(filter.to_string(), "halloween_route=debug");
    }

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).to_string(), DEFAULT_LOG_FILTER);
    }
}
