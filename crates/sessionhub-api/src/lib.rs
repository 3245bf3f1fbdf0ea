//! # sessionhub-api
//!
//! HTTP API layer for SessionHub built on Axum.
//!
//! Provides the session endpoints, request logging and CORS middleware, the
//! client-IP extractor, host identity detection, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod network;
pub mod router;
pub mod state;

pub use network::ServerIdentity;
pub use router::build_router;
pub use state::AppState;
