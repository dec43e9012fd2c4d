//! HTTP server module for the matching backend.
//!
//! An axum-based HTTP server that exposes the service layer as a REST API.
//! Handlers translate requests and responses; all business logic lives in
//! the service layer, all persistence behind the repository traits.

#[cfg(feature = "http-server")]
pub mod handlers;

#[cfg(feature = "http-server")]
pub mod router;

#[cfg(feature = "http-server")]
pub mod state;

#[cfg(feature = "http-server")]
pub mod error;

#[cfg(feature = "http-server")]
pub mod dto;

#[cfg(feature = "http-server")]
pub use router::create_router;

#[cfg(feature = "http-server")]
pub use state::AppState;
