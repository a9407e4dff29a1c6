//! Web server module
//!
//! Provides the HTTP API for SearchChat-RS.

mod error;
pub mod handlers;
mod routes;
mod state;

pub use error::{ApiError, ErrorBody};
pub use routes::create_router;
pub use state::AppState;
