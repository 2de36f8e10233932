// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;

use crate::application::visual_service::VisualService;
use crate::infrastructure::config::{load_server_config, load_visuals_config};
use crate::infrastructure::config_repository::ConfigVisualRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{health_check, list_visuals, render_visual};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (RUST_LOG)
    tracing_subscriber::fmt::init();

    // Load configuration
    let server_config = load_server_config()?;
    let visuals_config = load_visuals_config()?;
    tracing::info!("Loaded {} visuals", visuals_config.visuals.len());

    // Create repository (infrastructure layer)
    let repository = Arc::new(ConfigVisualRepository::new(visuals_config));

    // Create services (application layer)
    let visual_service = VisualService::new(repository);

    let state = Arc::new(AppState { visual_service });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/visuals", get(list_visuals))
        .route("/visuals/:id/render", post(render_visual))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = server_config.server.bind.parse()?;
    tracing::info!("Starting scorecard-visuals service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
