//! Face Registry Service
//!
//! Registers faces by name and identifies unknown faces over a REST API.
//! Embeddings come from an external face-encoding provider.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use muf::api::{create_rest_router, AppState};
use muf::config::{Config, StorageBackend};
use muf::engine::RemoteProvider;
use muf::service::FaceService;
use muf::storage::{FaceStore, JsonFileStore, MemoryStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    info!("Starting Face Registry Service v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = Config::default_path();
    let config = Config::load(&config_path).unwrap_or_else(|e| {
        info!("Using default config ({})", e);
        Config::default()
    });

    info!("Configuration loaded:");
    info!("  Listen: {}:{}", config.server.host, config.server.port);
    info!("  Storage: {:?} at {:?}", config.storage.backend, config.storage.path);
    info!("  Provider: {} (timeout {}ms)", config.provider.endpoint, config.provider.timeout_ms);
    info!("  Duplicate threshold: {}", config.recognition.duplicate_threshold);
    if let Some(dim) = config.recognition.embedding_dim {
        info!("  Embedding dim: {}", dim);
    }
    if config.server.legacy_status_codes {
        info!("  Validation errors answered with 200");
    }

    // Initialize embedding provider
    let provider = Arc::new(
        RemoteProvider::new(&config.provider, &config.recognition)
            .context("Failed to build embedding provider client")?,
    );

    // Initialize storage
    match config.storage.backend {
        StorageBackend::Json => {
            let store = Arc::new(JsonFileStore::new(&config.storage.path));
            info!("JSON storage at: {:?}", store.path());
            serve(store, provider, config).await
        }
        StorageBackend::Memory => {
            info!("In-memory storage, registrations are lost on exit");
            serve(Arc::new(MemoryStore::new()), provider, config).await
        }
    }
}

async fn serve<S: FaceStore>(store: Arc<S>, provider: Arc<RemoteProvider>, config: Config) -> Result<()> {
    // Fail fast on an unreadable database
    let db = store.load().await.context("Failed to load face database")?;
    info!("{} face(s) registered", db.len());

    let service = Arc::new(FaceService::new(store, provider, config.recognition.clone()));
    let router = create_rest_router(AppState::new(service, &config));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("REST API listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received, cleaning up...");
        })
        .await?;

    info!("Goodbye!");
    Ok(())
}
