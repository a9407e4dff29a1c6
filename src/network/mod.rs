//! HTTP networking module
//!
//! Provides HTTP client functionality for calling the search and model APIs.

mod client;
mod types;

pub use client::HttpClient;
pub use types::{HttpMethod, HttpRequest, HttpResponse};
