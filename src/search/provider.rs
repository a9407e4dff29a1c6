//! Search provider trait

use super::models::SearchOutcome;
use async_trait::async_trait;

/// Hard cap on results per query
pub const MAX_RESULTS: usize = 10;

/// A web search backend.
///
/// Search is best-effort: implementations report failures through
/// [`SearchOutcome::Unavailable`] and never abort the caller. At most
/// `min(max_results, MAX_RESULTS)` results are returned, in provider order.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name, used in logs
    fn name(&self) -> &str;

    /// Run a query
    async fn search(&self, query: &str, max_results: usize) -> SearchOutcome;
}

/// Effective result count for a requested maximum
pub fn capped(max_results: usize) -> usize {
    max_results.min(MAX_RESULTS)
}
