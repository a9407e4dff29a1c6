//! SearchChat-RS: a conversational backend with live web-search augmentation
//!
//! This is the main entry point for the application.

use anyhow::Result;
use searchchat_rs::{
    config,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration before logging so debug can raise the level
    let (settings, source) = config::load()?;

    let default_level = if settings.general.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    info!("Starting SearchChat-RS v{}", searchchat_rs::VERSION);
    match source {
        Some(path) => info!("Loaded settings from: {}", path.display()),
        None => info!("No settings file found, using defaults"),
    }
    info!(
        "Locale: {}, model: {}/{}, store: {}",
        settings.general.locale, settings.llm.provider, settings.llm.model, settings.storage.url
    );

    if settings.llm.api_key.is_none() {
        info!("No model API key configured; turns will fail until one is set");
    }
    if settings.search.api_key.is_none() || settings.search.engine_id.is_none() {
        info!("Search credentials missing; replies will not be augmented");
    }

    // Create application state
    let state = AppState::from_settings(settings.clone())?;
    info!("Application state initialized");

    // Create router
    let app = create_router(state);

    // Bind address
    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
