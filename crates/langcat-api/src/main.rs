//! Binary entrypoint for the Langcat API server.
use langcat_api::{config::ApiConfig, run};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        catalog = %config.catalog_path.display(),
        timeout_ms = config.request_timeout.as_millis() as u64,
        "starting langcat-api"
    );

    run(config).await
}
