//! HTTP request handlers

use super::error::ApiError;
use super::state::AppState;
use crate::chat::{ChatRequest, ChatResponse, Message};
use crate::locales::keys;
use crate::search::SearchResult;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

/// Query parameters for history
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<usize>,
}

/// Query parameters for the search diagnostic
#[derive(Debug, Deserialize)]
pub struct TestSearchParams {
    pub q: Option<String>,
}

/// Response of a history delete
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted_count: u64,
}

/// Response of the search diagnostic
#[derive(Debug, Serialize, Deserialize)]
pub struct TestSearchResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// API root handler
pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "message": state.translations.get(keys::SERVICE_NAME)
    }))
}

/// Turn submission; business failures come back as `success: false`
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    Json(
        state
            .orchestrator
            .submit_turn(&request.session_id, &request.message)
            .await,
    )
}

/// Session history handler
pub async fn history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let limit = params.limit.unwrap_or_else(|| state.history_limit());

    state
        .orchestrator
        .history(&session_id, limit)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("History lookup failed for session {}: {}", session_id, e);
            ApiError::Internal(state.translations.get(keys::ERROR_HISTORY))
        })
}

/// Session delete handler
pub async fn clear_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state
        .orchestrator
        .clear_history(&session_id)
        .await
        .map(|deleted_count| Json(DeleteResponse { deleted_count }))
        .map_err(|e| {
            tracing::error!("History delete failed for session {}: {}", session_id, e);
            ApiError::Internal(state.translations.get(keys::ERROR_DELETE))
        })
}

/// Search diagnostic handler
pub async fn test_search(
    State(state): State<AppState>,
    Query(params): Query<TestSearchParams>,
) -> Json<TestSearchResponse> {
    let query = params.q.unwrap_or_else(|| "test".to_string());
    let outcome = state.orchestrator.test_search(&query).await;
    let error = outcome.error().map(str::to_string);
    let results = outcome.into_results();

    Json(TestSearchResponse {
        query,
        count: results.len(),
        results,
        error,
    })
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
