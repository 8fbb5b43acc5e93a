// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};
use axum::{routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::application::dashboard_service::DashboardService;
use crate::application::normalizer::Normalizer;
use crate::application::poller::spawn_poller;
use crate::application::reading_service::ReadingService;
use crate::infrastructure::config::load_service_config;
use crate::infrastructure::upstream_repository::UpstreamRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_dashboard, get_diagnostics, get_readings, health_check};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let cfg = load_service_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(UpstreamRepository::new(cfg.upstream.base_url.clone()));

    // Create services (application layer)
    let normalizer = Normalizer::default();
    let reading_service = ReadingService::new(repository.clone(), normalizer.clone());
    let dashboard_service = DashboardService::new(repository.clone(), normalizer.clone());

    // Background refresh for the configured collection
    if cfg.poll.enabled {
        spawn_poller(
            repository.clone(),
            normalizer,
            cfg.upstream.collection.clone(),
            Duration::from_secs(cfg.poll.interval_secs),
        );
    }

    // Create application state
    let state = Arc::new(AppState {
        reading_service,
        dashboard_service,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/readings/:collection", get(get_readings))
        .route("/dashboard/:collection", get(get_dashboard))
        .route("/diagnostics/:collection", get(get_diagnostics))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = cfg.server.bind.parse()?;
    tracing::info!("Starting watertank-telemetry service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
