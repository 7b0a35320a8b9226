mod api;
mod config;
mod sentiment;
mod storage;

use crate::api::AppState;
use crate::config::AppConfig;
use crate::sentiment::SentimentClassifier;
use crate::storage::ReviewStore;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("🚀 Starting Review Sentiment API Server");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Negative roots: {:?}", config.classifier.negative_roots);
    info!("   - Positive roots: {:?}", config.classifier.positive_roots);
    info!("   - Database: {:?}", config.storage.database_path);
    info!("   - Server: {}:{}", config.server.host, config.server.port);

    // Build classifier from the configured rule sets
    let classifier = Arc::new(SentimentClassifier::new(config.classifier.clone()));

    // Open review store (creates the schema if absent)
    info!("💾 Initializing review store...");
    let store = Arc::new(ReviewStore::open(&config.storage.database_path)?);
    let review_count = store.count().await.unwrap_or(0);
    info!("✅ Review store ready ({} reviews)", review_count);

    // Create application state
    let state = AppState { store, classifier };

    // Build router with modular routes
    let app = api::router(state).layer(TraceLayer::new_for_http()).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    );

    // Start server
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(config.server.port);
    let addr = format!("{}:{}", config.server.host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET  /health           - Health check");
    info!("   POST /reviews          - Add new review");
    info!("   GET  /reviews          - List reviews (optional ?sentiment= filter)");
    info!("");
    info!("✨ Server is ready to accept requests!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
