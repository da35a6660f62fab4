//! BraveSearch-RS server
//!
//! Serves the search tools over HTTP.

use anyhow::Result;
use bravesearch_rs::{
    config,
    network::HttpClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    info!("Starting BraveSearch-RS v{}", bravesearch_rs::VERSION);

    // Load configuration; a missing API key stops startup here
    let settings = config::load()?;
    settings.validate()?;
    info!(
        per_second = settings.rate_limit.per_second,
        per_period = settings.rate_limit.per_period,
        "Loaded configuration"
    );

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;
    info!("HTTP client initialized");

    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    // Create application state
    let state = AppState::new(settings, client)?;
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
