//! Application state shared across handlers

use crate::chat::ConversationOrchestrator;
use crate::config::Settings;
use crate::llm::OpenAiChat;
use crate::locales::Translations;
use crate::network::HttpClient;
use crate::search::{GoogleSearch, SearchTrigger};
use crate::store;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Turn coordinator
    pub orchestrator: Arc<ConversationOrchestrator>,
    /// Localized messages
    pub translations: Arc<Translations>,
}

impl AppState {
    /// Assemble state from already-built services
    pub fn new(
        settings: Settings,
        orchestrator: ConversationOrchestrator,
        translations: Translations,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            orchestrator: Arc::new(orchestrator),
            translations: Arc::new(translations),
        }
    }

    /// Build the production services described by the settings
    pub fn from_settings(settings: Settings) -> anyhow::Result<Self> {
        let translations = Translations::new(&settings.general.locale)?;
        let client = HttpClient::with_settings(&settings.outgoing)?;

        let search = Arc::new(GoogleSearch::new(client.clone(), &settings.search));
        let model = Arc::new(OpenAiChat::new(client, &settings.llm));
        let store = store::open(&settings.storage)?;

        let mut orchestrator = ConversationOrchestrator::new(search, model, store, &translations)
            .with_results_per_turn(settings.search.results_per_turn);
        if let Some(ref terms) = settings.search.trigger_terms {
            orchestrator = orchestrator.with_trigger(SearchTrigger::with_terms(terms));
        }

        Ok(Self::new(settings, orchestrator, translations))
    }

    /// Default history page size
    pub fn history_limit(&self) -> usize {
        self.settings.server.history_limit
    }
}
