//! Langcat API: REST endpoints over the language artifact catalog
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use config::ApiConfig;
use langcat_core::{CatalogQueryEngine, CatalogStore, MemoryStore};
use metrics::ApiMetrics;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: CatalogQueryEngine,
    pub metrics: Arc<ApiMetrics>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        request_timeout: Duration,
    ) -> Result<Self, prometheus::Error> {
        Ok(Self {
            engine: CatalogQueryEngine::new(store),
            metrics: Arc::new(ApiMetrics::new()?),
            request_timeout,
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/language", get(handlers::list_languages))
        .route("/language/{name}", get(handlers::get_language))
        .route("/language/{name}/{version}", get(handlers::get_version))
        .route("/language/{name}/{version}/{platform}", get(handlers::get_platform))
        .route(
            "/language/{name}/{version}/{platform}/{arch}",
            get(handlers::get_artifact),
        )
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .route_layer(from_fn_with_state(state.clone(), middleware::track_metrics))
        .layer(middleware::cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: ApiConfig) -> anyhow::Result<()> {
    let store = MemoryStore::load(&config.catalog_path)?;
    let state = AppState::new(Arc::new(store), config.request_timeout)?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    tracing::info!("Langcat API listening on {}", config.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
