//! Settings structures for SearchChat-RS configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub search: SearchSettings,
    pub llm: LlmSettings,
    pub storage: StorageSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (SEARCHCHAT_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Merge overrides from an arbitrary lookup, keyed like the environment
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("SEARCHCHAT_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = lookup("SEARCHCHAT_LOCALE") {
            self.general.locale = val;
        }
        if let Some(val) = lookup("SEARCHCHAT_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("SEARCHCHAT_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = lookup("SEARCHCHAT_CORS_ORIGINS") {
            self.server.cors_origins = val
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }
        if let Some(val) = lookup("SEARCHCHAT_STORE_URL") {
            self.storage.url = val;
        }
        if let Some(val) = lookup("SEARCHCHAT_STORE_NAME") {
            self.storage.name = val;
        }
        if let Some(val) = lookup("SEARCHCHAT_LLM_API_KEY") {
            self.llm.api_key = Some(val);
        }
        if let Some(val) = lookup("SEARCHCHAT_LLM_BASE_URL") {
            self.llm.base_url = val;
        }
        if let Some(val) = lookup("SEARCHCHAT_LLM_MODEL") {
            self.llm.model = val;
        }
        if let Some(val) = lookup("SEARCHCHAT_SEARCH_API_KEY") {
            self.search.api_key = Some(val);
        }
        if let Some(val) = lookup("SEARCHCHAT_SEARCH_ENGINE_ID") {
            self.search.engine_id = Some(val);
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Locale used for instructions, prompt labels and user-facing messages
    pub locale: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            locale: "tr".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Allowed cross-origin callers; "*" allows any origin
    pub cors_origins: Vec<String>,
    /// Default number of messages returned by the history endpoint
    pub history_limit: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8001,
            bind_address: "127.0.0.1".to_string(),
            cors_origins: vec!["*".to_string()],
            history_limit: 50,
        }
    }
}

impl ServerSettings {
    /// Whether any origin may call the API; an empty list allows none
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default request timeout in seconds
    pub request_timeout: f64,
    /// Pool max idle connections per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 30.0,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Web search provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Search API endpoint
    pub endpoint: String,
    /// Search API key
    pub api_key: Option<String>,
    /// Custom search engine id
    pub engine_id: Option<String>,
    /// Result language restriction (`lr` parameter)
    pub language: String,
    /// Interface language (`hl` parameter)
    pub interface_language: String,
    /// Request timeout in seconds
    pub timeout: f64,
    /// Number of results fetched when a turn needs augmentation
    pub results_per_turn: usize,
    /// Replacement trigger terms; the built-in Turkish list when unset
    pub trigger_terms: Option<Vec<String>>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://www.googleapis.com/customsearch/v1".to_string(),
            api_key: None,
            engine_id: None,
            language: "lang_tr".to_string(),
            interface_language: "tr".to_string(),
            timeout: 30.0,
            results_per_turn: 3,
            trigger_terms: None,
        }
    }
}

/// Language-model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Provider name, informational
    pub provider: String,
    /// Model identifier sent with each request
    pub model: String,
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    /// API key
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout: f64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            timeout: 120.0,
        }
    }
}

/// Document store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Store connection string (`memory://`, `sqlite://<path>`, `sqlite::memory:`)
    pub url: String,
    /// Store name; the table holding chat messages
    pub name: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            url: "memory://".to_string(),
            name: "chat_messages".to_string(),
        }
    }
}
