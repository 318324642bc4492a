mod config;
mod db;
mod embeddings;
mod errors;
mod metrics;
mod routes;
mod services;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use crate::db::VectorIndex;

/// Graceful shutdown signal handler
/// Listens for SIGINT (Ctrl+C) and SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    tracing::info!("Shutdown signal received, draining connections...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    dotenvy::dotenv().ok();
    let config = config::AppConfig::build().context("Failed to load configuration")?;

    // 2. Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.rust_log))
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting astro-rag..."
    );

    // 3. Open the vector index. The corpus is the whole point of this
    // service, so failing to open it is fatal.
    let index = Arc::new(
        db::PgVectorIndex::connect(&config.database)
            .await
            .context("Failed to open vector index")?,
    );
    let documents = index
        .count()
        .await
        .context("Failed to count stored passages")?;
    tracing::info!(documents, "Connected to vector index");

    // 4. Initialize the embedder
    let embedder: Arc<dyn embeddings::Embedder> = if config.embeddings.model_api_key == "mock" {
        tracing::warn!("Using mock embedder - not for production use");
        Arc::new(embeddings::MockEmbedder::new(config.embeddings.embedding_dim))
    } else {
        Arc::new(embeddings::CloudEmbedder::new(config.embeddings.clone()))
    };

    // 5. App state and router
    let state = services::AppState::new(index, embedder);
    let app = routes::create_router(state);

    // 6. Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
