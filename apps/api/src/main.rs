mod config;
mod db;
mod errors;
mod fixtures;
mod models;
mod normalizer;
mod routes;
mod state;
mod store;
mod validation;
mod views;

use anyhow::Result;
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, DataMode};
use crate::db::create_pool;
use crate::fixtures::{DataProvider, FixtureProvider};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{fixture::FixtureWorkerStore, postgres::PgWorkerStore, WorkerStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on invalid or missing env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillPath API v{}", env!("CARGO_PKG_VERSION"));

    // Fixtures back the learner and analytics endpoints in both modes
    let fixtures: Arc<dyn DataProvider> = Arc::new(FixtureProvider::load(&config).await?);

    let store: Arc<dyn WorkerStore> = match (config.data_mode, config.database_url.as_deref()) {
        (DataMode::Live, Some(url)) => Arc::new(PgWorkerStore::new(create_pool(url).await?)),
        (DataMode::Live, None) => anyhow::bail!("DATA_MODE=live requires DATABASE_URL"),
        (DataMode::Mock, _) => Arc::new(FixtureWorkerStore::new(fixtures.clone())),
    };
    info!("Worker store initialized (mode: {})", store.mode());

    let state = AppState { store, fixtures };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Allows the configured frontend origins; an empty list allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{origin}'");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
