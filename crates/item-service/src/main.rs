use anyhow::{Context, Result};
use item_service::config::Config;
use item_service::repository::MemoryItemRepository;
use item_service::{build_app, messages, seed, AppState, DEFAULT_LOG_FILTER};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = Config::load_default()?;
    config.apply_env()?;
    info!(
        port = config.server.port,
        locale = %config.messages.default_locale,
        "item-service starting"
    );

    let catalog = messages::load_catalog(&config.messages)?;

    let repository = Arc::new(MemoryItemRepository::new());
    if config.seed.enabled {
        seed(repository.as_ref()).await.context("Failed to seed items")?;
        info!(items = repository.len().await, "seeded demo items");
    }

    let app = build_app(AppState::new(repository, Arc::new(catalog)));

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
