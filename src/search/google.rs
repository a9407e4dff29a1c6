//! Google Programmable Search (Custom Search JSON API) provider

use super::models::{SearchOutcome, SearchResult};
use super::provider::{capped, SearchProvider};
use crate::config::SearchSettings;
use crate::network::{HttpClient, HttpRequest, HttpResponse};
use anyhow::{anyhow, Result as AnyhowResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Custom Search API response body
#[derive(Debug, Deserialize)]
struct CseResponse {
    #[serde(default)]
    items: Vec<CseItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CseItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    display_link: String,
}

/// Google Custom Search provider
pub struct GoogleSearch {
    client: HttpClient,
    endpoint: String,
    api_key: Option<String>,
    engine_id: Option<String>,
    language: String,
    interface_language: String,
    timeout: Duration,
}

impl GoogleSearch {
    pub fn new(client: HttpClient, settings: &SearchSettings) -> Self {
        Self {
            client,
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            engine_id: settings.engine_id.clone(),
            language: settings.language.clone(),
            interface_language: settings.interface_language.clone(),
            timeout: Duration::from_secs_f64(settings.timeout),
        }
    }

    /// Build the HTTP request for a query
    fn request(&self, query: &str, num: usize) -> AnyhowResult<HttpRequest> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("search API key is not configured"))?;
        let engine_id = self
            .engine_id
            .as_deref()
            .ok_or_else(|| anyhow!("search engine id is not configured"))?;

        Ok(HttpRequest::get(&self.endpoint)
            .param("key", api_key)
            .param("cx", engine_id)
            .param("q", query)
            .param("num", num.to_string())
            .param("lr", &self.language)
            .param("hl", &self.interface_language))
    }

    /// Parse the HTTP response into results
    fn response(&self, response: HttpResponse, num: usize) -> AnyhowResult<Vec<SearchResult>> {
        if !response.is_success() {
            return Err(anyhow!(
                "HTTP error {}: {}",
                response.status,
                response.body_excerpt(200)
            ));
        }

        let body: CseResponse = response.json()?;

        Ok(body
            .items
            .into_iter()
            .take(num)
            .map(|item| SearchResult {
                title: item.title,
                link: item.link,
                snippet: item.snippet,
                display_link: item.display_link,
            })
            .collect())
    }

    async fn try_search(&self, query: &str, num: usize) -> AnyhowResult<Vec<SearchResult>> {
        let request = self.request(query, num)?;
        let response = self
            .client
            .execute_with_timeout(request, self.timeout)
            .await?;
        self.response(response, num)
    }
}

#[async_trait]
impl SearchProvider for GoogleSearch {
    fn name(&self) -> &str {
        "google"
    }

    async fn search(&self, query: &str, max_results: usize) -> SearchOutcome {
        let num = capped(max_results);
        if num == 0 || query.trim().is_empty() {
            return SearchOutcome::Empty;
        }

        match self.try_search(query, num).await {
            Ok(results) => {
                debug!("Search '{}' returned {} results", query, results.len());
                SearchOutcome::from_results(results)
            }
            Err(e) => {
                warn!("Search provider {} unavailable: {}", self.name(), e);
                SearchOutcome::Unavailable(e.to_string())
            }
        }
    }
}
