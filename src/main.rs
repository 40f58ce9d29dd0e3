// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::http_repository::HttpUvRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpUvRepository::new(
        config.api.base_url.clone(),
        Duration::from_secs(config.api.timeout_secs),
    )?);

    // Create services (application layer)
    let dashboard = Arc::new(DashboardService::new(repository, &config.display));

    // Background refresh; the first tick fires immediately
    let refresher = dashboard.clone();
    let refresh_every = Duration::from_secs(config.server.refresh_secs.max(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_every);
        loop {
            interval.tick().await;
            tracing::debug!("Refreshing dashboard");
            refresher.refresh().await;
        }
    });

    // Create application state
    let state = Arc::new(AppState { dashboard });

    // Build router (presentation layer)
    let app = router(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting uv-monitor on {} (API {})", addr, config.api.base_url);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
