//! Conversation orchestration
//!
//! Runs one turn: persist the user message, decide on search, fetch
//! results, compose the prompt, invoke the model, persist the reply.

use super::error::ChatError;
use super::models::{ChatResponse, Message};
use crate::llm::{CompletionRequest, LanguageModel};
use crate::locales::{keys, Translations};
use crate::prompt::PromptComposer;
use crate::search::{SearchOutcome, SearchProvider, SearchTrigger, Source};
use crate::store::MessageStore;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Results fetched for a turn that needs augmentation
pub const DEFAULT_RESULTS_PER_TURN: usize = 3;

/// Coordinates trigger, search, prompt composition, model and store
pub struct ConversationOrchestrator {
    trigger: SearchTrigger,
    search: Arc<dyn SearchProvider>,
    composer: PromptComposer,
    model: Arc<dyn LanguageModel>,
    store: Arc<dyn MessageStore>,
    results_per_turn: usize,
    apology: String,
}

impl ConversationOrchestrator {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        model: Arc<dyn LanguageModel>,
        store: Arc<dyn MessageStore>,
        translations: &Translations,
    ) -> Self {
        Self {
            trigger: SearchTrigger::new(),
            search,
            composer: PromptComposer::new(translations),
            model,
            store,
            results_per_turn: DEFAULT_RESULTS_PER_TURN,
            apology: translations.get(keys::ERROR_APOLOGY),
        }
    }

    /// Replace the trigger
    pub fn with_trigger(mut self, trigger: SearchTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    /// Set the number of search results fetched per augmented turn
    pub fn with_results_per_turn(mut self, count: usize) -> Self {
        self.results_per_turn = count;
        self
    }

    /// Run one turn and return the persisted assistant reply.
    ///
    /// The user message is stored before any external call and is never
    /// rolled back.
    pub async fn handle_turn(&self, session_id: &str, user_text: &str) -> Result<Message, ChatError> {
        let user_message = Message::user(session_id, user_text);
        self.store.append(&user_message).await?;

        let needs_search = self.trigger.should_search(user_text);
        let results = if needs_search {
            if let Some(term) = self.trigger.matched_term(user_text) {
                debug!("Session {}: search triggered by '{}'", session_id, term);
            }
            let outcome = self.search.search(user_text, self.results_per_turn).await;
            if let SearchOutcome::Unavailable(ref reason) = outcome {
                warn!(
                    "Search unavailable for session {}, continuing without it: {}",
                    session_id, reason
                );
            }
            outcome.into_results()
        } else {
            Vec::new()
        };

        debug!(
            "Session {}: needs_search={}, results={}",
            session_id,
            needs_search,
            results.len()
        );

        let sources: Vec<Source> = results.iter().map(|r| r.to_source()).collect();
        let system_prompt = self.composer.system_prompt(&results);

        let reply = self
            .model
            .complete(CompletionRequest {
                session_id: session_id.to_string(),
                system_prompt,
                user_text: user_text.to_string(),
            })
            .await?;

        let assistant_message = Message::assistant(session_id, &reply, sources);
        self.store.append(&assistant_message).await?;

        info!(
            "Session {}: replied (used_search={})",
            session_id, assistant_message.used_search
        );

        Ok(assistant_message)
    }

    /// Run one turn, turning failures into a localized apology.
    ///
    /// The apology message is not persisted.
    pub async fn submit_turn(&self, session_id: &str, user_text: &str) -> ChatResponse {
        match self.handle_turn(session_id, user_text).await {
            Ok(message) => ChatResponse::ok(message),
            Err(e) => {
                error!("Turn failed for session {}: {}", session_id, e);
                let apology = Message::assistant(session_id, &self.apology, Vec::new());
                ChatResponse::failed(apology, e.to_string())
            }
        }
    }

    /// A session's messages, oldest first
    pub async fn history(&self, session_id: &str, limit: usize) -> Result<Vec<Message>, ChatError> {
        Ok(self.store.history(session_id, limit).await?)
    }

    /// Delete a session's messages, returning the count removed
    pub async fn clear_history(&self, session_id: &str) -> Result<u64, ChatError> {
        let deleted = self.store.delete_session(session_id).await?;
        info!("Session {}: deleted {} messages", session_id, deleted);
        Ok(deleted)
    }

    /// Run the search provider directly
    pub async fn test_search(&self, query: &str) -> SearchOutcome {
        self.search.search(query, self.results_per_turn).await
    }
}
