use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use bhashini_proxy::{routes, AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("bhashini_proxy=debug,tower_http=debug")
        .init();

    // Load configuration from the environment
    let config = AppConfig::from_env();
    if config.api_key.is_none() {
        warn!("BHASHINI_API_KEY is not set; upstream requests will be sent unauthenticated");
    }
    let port = config.port;

    // Initialize app state
    let state = AppState::new(config);

    // Precache the app shell; a failed install leaves the worker serving from disk
    if let Err(err) = state.worker.install().await {
        warn!("Shell precache failed: {:#}", err);
    }
    state.worker.activate();

    // Build application
    let app = Router::new()
        .merge(routes::create_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
