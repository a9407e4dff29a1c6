//! Search module
//!
//! Decides when a message needs live information and fetches it.

mod models;
mod provider;
mod trigger;

pub mod google;

pub use google::GoogleSearch;
pub use models::{SearchOutcome, SearchResult, Source};
pub use provider::{capped, SearchProvider, MAX_RESULTS};
pub use trigger::{SearchTrigger, DEFAULT_TRIGGER_TERMS};
