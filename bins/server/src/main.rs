//! Finansi API Server
//!
//! Main entry point for the Finansi statement service.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finansi_api::{AppState, create_router};
use finansi_core::storage::{StorageConfig, StorageProvider, StorageService};
use finansi_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finansi=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Create storage service
    let storage = StorageService::from_config(StorageConfig::new(StorageProvider::local_fs(
        config.storage.root.clone(),
    )))?;
    info!(
        provider = storage.provider_name(),
        root = %config.storage.root.display(),
        "Storage configured"
    );
    info!(
        template = %config.template.workbook_path.display(),
        max_upload_bytes = config.upload.max_size_bytes,
        "Upload settings loaded"
    );

    // Create application state and router
    let state = AppState::new(&config, storage);
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
