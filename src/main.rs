mod config;
mod dto;
mod handlers;
mod models;
mod repository;
mod service;
#[cfg(test)]
mod testing;
mod validation;

use std::sync::Arc;

use config::StoreConfig;
use handlers::rest;
use repository::{MemoryStore, NoteStore, Repository};
use service::NoteService;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to locate or load config: {e}");
    });
    tracing::info!("Successfully loaded notes service config");

    // Store creation and migration
    let store: Arc<dyn NoteStore> = match cfg.store {
        StoreConfig::Postgres { dsn } => {
            let mut repo = Repository::new(&dsn).await.unwrap_or_else(|e| {
                tracing::error!("Failed to establish database connection: {e}");
                panic!("failed to establish database connection: {e}");
            });

            repo.migrate().await.unwrap_or_else(|e| {
                tracing::error!("Failed to migrate database: {e}");
                panic!("failed to migrate database: {e}");
            });

            Arc::new(repo)
        }
        StoreConfig::Memory => {
            tracing::info!("Using in-memory note store");
            Arc::new(MemoryStore::new())
        }
    };

    // Service creation
    let service = Arc::new(NoteService::new(store));

    // Router config
    let router = rest::router(service);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cfg.port))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind port {}: {e}", cfg.port);
            panic!("failed to bind port {}: {e}", cfg.port);
        });

    // Starting router
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Notes service starting, listening on {}", addr);
    }
    axum::serve(listener, router)
        .await
        .expect("failed to start server");
}
