//! Route definitions

use super::handlers;
use super::state::AppState;
use crate::config::ServerSettings;
use axum::{
    http::HeaderValue,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// CORS layer for the configured origins
fn cors_layer(server: &ServerSettings) -> CorsLayer {
    let origin = if server.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = server
            .cors_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings.server);

    Router::new()
        // API routes
        .route("/api", get(handlers::root))
        .route("/api/", get(handlers::root))
        .route("/api/chat", post(handlers::chat))
        .route("/api/chat/:session_id/history", get(handlers::history))
        .route("/api/chat/:session_id", delete(handlers::clear_history))
        .route("/api/test-search", get(handlers::test_search))
        // Health
        .route("/health", get(handlers::health))
        // Add middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // Add state
        .with_state(state)
}
