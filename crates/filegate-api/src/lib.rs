//! Filegate API Library
//!
//! This crate provides the HTTP handlers, middleware and application setup for the
//! presigned upload/download service.

// Module declarations
mod api_doc;
mod handlers;
mod middleware;
pub mod setup;
mod telemetry;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
pub use state::AppState;
