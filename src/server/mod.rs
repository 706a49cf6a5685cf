pub mod routes;

use crate::config::ServerConfig;
use crate::core::ObjectStore;
use crate::utils::error::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Shared, read-only state handed to every request.
pub struct AppState<S> {
    pub store: Arc<S>,
    pub config: Arc<ServerConfig>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S: ObjectStore> AppState<S> {
    pub fn new(store: S, config: ServerConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}

pub fn create_router<S: ObjectStore + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/report", post(routes::create_report::<S>))
        .with_state(state)
}

pub async fn serve<S: ObjectStore + 'static>(config: ServerConfig, store: S) -> Result<()> {
    let addr = config.socket_addr()?;
    let app = create_router(AppState::new(store, config));

    let listener = TcpListener::bind(addr).await?;
    info!("🚀 Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}
