//! Integration tests for the chat API.
//!
//! Each test builds its own router over the in-memory store with fake
//! search and model collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use searchchat_rs::chat::ConversationOrchestrator;
use searchchat_rs::config::Settings;
use searchchat_rs::llm::{CompletionRequest, LanguageModel, LlmError, ModelSelector};
use searchchat_rs::locales::Translations;
use searchchat_rs::search::{SearchOutcome, SearchProvider, SearchResult};
use searchchat_rs::store::{MemoryStore, MessageStore, StoreError};
use searchchat_rs::web::{create_router, AppState};
use searchchat_rs::Message;

// =============================================================================
// Fakes
// =============================================================================

struct FakeSearch {
    outcome: SearchOutcome,
    calls: AtomicUsize,
}

#[async_trait]
impl SearchProvider for FakeSearch {
    fn name(&self) -> &str {
        "fake"
    }

    async fn search(&self, _query: &str, max_results: usize) -> SearchOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            SearchOutcome::Results(results) => {
                SearchOutcome::Results(results.iter().take(max_results).cloned().collect())
            }
            other => other.clone(),
        }
    }
}

struct FakeModel {
    selector: ModelSelector,
    fail: bool,
}

#[async_trait]
impl LanguageModel for FakeModel {
    fn selector(&self) -> &ModelSelector {
        &self.selector
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        if self.fail {
            Err(LlmError::Status {
                status: 503,
                body: "overloaded".to_string(),
            })
        } else {
            Ok(format!("Yanıt: {}", request.user_text))
        }
    }
}

struct BrokenStore;

#[async_trait]
impl MessageStore for BrokenStore {
    async fn append(&self, _message: &Message) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }

    async fn history(&self, _session_id: &str, _limit: usize) -> Result<Vec<Message>, StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }

    async fn delete_session(&self, _session_id: &str) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn search_results(count: usize) -> Vec<SearchResult> {
    (1..=count)
        .map(|i| {
            SearchResult::new(
                format!("Döviz {i}"),
                format!("https://doviz{i}.test/usd"),
                format!("USD/TRY {i}"),
                format!("doviz{i}.test"),
            )
        })
        .collect()
}

struct Harness {
    app: axum::Router,
    search: Arc<FakeSearch>,
}

fn harness(outcome: SearchOutcome, model_fails: bool, store: Arc<dyn MessageStore>) -> Harness {
    harness_with_settings(Settings::default(), outcome, model_fails, store)
}

fn harness_with_settings(
    settings: Settings,
    outcome: SearchOutcome,
    model_fails: bool,
    store: Arc<dyn MessageStore>,
) -> Harness {
    let search = Arc::new(FakeSearch {
        outcome,
        calls: AtomicUsize::new(0),
    });
    let model = Arc::new(FakeModel {
        selector: ModelSelector::new("fake", "fake-model"),
        fail: model_fails,
    });
    let translations = Translations::new("tr").unwrap();
    let orchestrator =
        ConversationOrchestrator::new(search.clone(), model, store, &translations);
    let state = AppState::new(settings, orchestrator, translations);

    Harness {
        app: create_router(state),
        search,
    }
}

fn default_harness() -> Harness {
    harness(
        SearchOutcome::Results(search_results(5)),
        false,
        Arc::new(MemoryStore::new()),
    )
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_chat(session_id: &str, message: &str) -> Request<Body> {
    Request::post("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "session_id": session_id, "message": message }).to_string(),
        ))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::delete(uri).body(Body::empty()).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn root_returns_service_name() {
    let h = default_harness();
    let (status, body) = send(&h.app, get("/api/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Akıllı Arama Chatbot API");
}

#[tokio::test]
async fn health_reports_ok() {
    let h = default_harness();
    let (status, body) = send(&h.app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn chat_with_trigger_term_cites_sources() {
    let h = default_harness();
    let (status, body) = send(&h.app, post_chat("s1", "Dolar kuru ne kadar?")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["error"].is_null());
    assert_eq!(h.search.calls.load(Ordering::SeqCst), 1);

    let message = &body["message"];
    assert_eq!(message["role"], "assistant");
    assert_eq!(message["content"], "Yanıt: Dolar kuru ne kadar?");
    assert_eq!(message["used_search"], true);

    let sources = message["sources"].as_array().unwrap();
    assert!(!sources.is_empty() && sources.len() <= 3);
    assert_eq!(sources[0]["url"], "https://doviz1.test/usd");
    assert_eq!(sources[0]["title"], "Döviz 1");
}

#[tokio::test]
async fn chat_without_trigger_term_skips_search() {
    let h = default_harness();
    let (status, body) = send(&h.app, post_chat("s1", "Merhaba")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(h.search.calls.load(Ordering::SeqCst), 0);
    assert_eq!(body["message"]["used_search"], false);
    assert!(body["message"]["sources"].is_null());
}

#[tokio::test]
async fn chat_model_failure_returns_apology_with_200() {
    let store = Arc::new(MemoryStore::new());
    let h = harness(SearchOutcome::Empty, true, store.clone());

    let (status, body) = send(&h.app, post_chat("s1", "Merhaba")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("503"));
    assert_eq!(
        body["message"]["content"],
        "Üzgünüm, bir hata oluştu. Lütfen tekrar deneyin."
    );
    assert_eq!(body["message"]["used_search"], false);

    // Only the user message was kept
    let history = store.history("s1", 50).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].text, "Merhaba");
}

#[tokio::test]
async fn chat_store_failure_returns_apology_with_200() {
    let h = harness(SearchOutcome::Empty, false, Arc::new(BrokenStore));
    let (status, body) = send(&h.app, post_chat("s1", "Merhaba")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("offline"));
}

#[tokio::test]
async fn history_is_ordered_and_repeatable() {
    let h = default_harness();
    send(&h.app, post_chat("s1", "Merhaba")).await;
    send(&h.app, post_chat("s1", "Bugün hava durumu nasıl?")).await;
    send(&h.app, post_chat("s2", "Selam")).await;

    let (status, first) = send(&h.app, get("/api/chat/s1/history")).await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = send(&h.app, get("/api/chat/s1/history")).await;
    assert_eq!(first, second);

    let messages = first.as_array().unwrap();
    let roles: Vec<_> = messages.iter().map(|m| m["role"].as_str().unwrap()).collect();
    assert_eq!(roles, vec!["user", "assistant", "user", "assistant"]);
    assert_eq!(messages[0]["content"], "Merhaba");
    assert_eq!(messages[2]["content"], "Bugün hava durumu nasıl?");
    assert_eq!(messages[3]["used_search"], true);
}

#[tokio::test]
async fn history_respects_limit() {
    let h = default_harness();
    send(&h.app, post_chat("s1", "Merhaba")).await;
    send(&h.app, post_chat("s1", "Nasılsın")).await;

    let (_, body) = send(&h.app, get("/api/chat/s1/history?limit=3")).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn delete_removes_only_that_session() {
    let h = default_harness();
    send(&h.app, post_chat("s1", "Merhaba")).await;
    send(&h.app, post_chat("s2", "Selam")).await;

    let (status, body) = send(&h.app, delete("/api/chat/s1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted_count"], 2);

    let (_, s1) = send(&h.app, get("/api/chat/s1/history")).await;
    assert!(s1.as_array().unwrap().is_empty());
    let (_, s2) = send(&h.app, get("/api/chat/s2/history")).await;
    assert_eq!(s2.as_array().unwrap().len(), 2);

    let (_, again) = send(&h.app, delete("/api/chat/s1")).await;
    assert_eq!(again["deleted_count"], 0);
}

#[tokio::test]
async fn history_and_delete_failures_are_500() {
    let h = harness(SearchOutcome::Empty, false, Arc::new(BrokenStore));

    let (status, body) = send(&h.app, get("/api/chat/s1/history")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Chat geçmişi alınamadı");

    let (status, body) = send(&h.app, delete("/api/chat/s1")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Chat geçmişi silinemedi");
}

#[tokio::test]
async fn test_search_returns_raw_results() {
    let h = default_harness();
    let (status, body) = send(&h.app, get("/api/test-search?q=borsa")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "borsa");
    assert_eq!(body["count"], 3);
    assert_eq!(body["results"][0]["display_link"], "doviz1.test");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_search_defaults_query_and_reports_unavailable() {
    let h = harness(
        SearchOutcome::Unavailable("HTTP error 403".to_string()),
        false,
        Arc::new(MemoryStore::new()),
    );
    let (status, body) = send(&h.app, get("/api/test-search")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "test");
    assert_eq!(body["count"], 0);
    assert_eq!(body["error"], "HTTP error 403");
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let h = default_harness();
    let request = Request::get("/health")
        .header("origin", "http://ui.test")
        .body(Body::empty())
        .unwrap();
    let response = h.app.clone().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn cors_with_empty_origin_list_allows_none() {
    let mut settings = Settings::default();
    settings.server.cors_origins = Vec::new();
    let h = harness_with_settings(
        settings,
        SearchOutcome::Empty,
        false,
        Arc::new(MemoryStore::new()),
    );

    let request = Request::get("/health")
        .header("origin", "http://ui.test")
        .body(Body::empty())
        .unwrap();
    let response = h.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("access-control-allow-origin").is_none());
}
