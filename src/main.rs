use carte::api::{self, app_state::AppState};
use carte::config::loader::ConfigLoader;
use carte::observability::{AppMetrics, ObservabilityState, create_observability_router, init_tracing};
use carte::services::clock::SystemClock;
use carte::storage::StorageFactory;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load()?;
    ConfigLoader::validate(&config)?;

    let _log_guard = init_tracing(env!("CARGO_PKG_NAME"), &config.logging);
    info!(
        "Starting {} ({}), storage backend: {}",
        config.app_name, config.environment, config.database.db_type
    );

    let store = StorageFactory::create(&config.database).await?;
    info!("Record store initialized");

    let metrics = Arc::new(AppMetrics::new()?);
    let app_state = AppState::from_policy(
        store.clone(),
        Arc::new(SystemClock),
        &config.policy,
        metrics.clone(),
    );
    info!("Application state created");

    let observability_state = Arc::new(ObservabilityState::new(
        env!("CARGO_PKG_VERSION").to_string(),
        metrics,
        store,
    ));
    let api_router = api::create_router(app_state, &config.server.cors_origins);
    let router = create_observability_router(observability_state).merge(api_router);
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
