//! # rv-api
//!
//! REST handlers for Receivables RS.
//!
//! The project and payment routes keep the paths and response shapes of the
//! original receivables server, so existing clients and [`rv_sync::HttpRemoteSync`]
//! can talk to it. Statistics, backups, import/export and the AI assistant
//! are served alongside.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod representers;
pub mod routes;

pub use extractors::{AiState, AppState};
pub use routes::router;

#[cfg(test)]
pub(crate) mod testing;
