//! Route definitions for the SessionHub HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(session_routes())
        .merge(health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(timeout_layer(timeout))
        .layer(cors)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Requests running past `timeout` are answered with 408.
fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

/// Session lifecycle endpoints
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::session::login))
        .route("/logout", post(handlers::session::logout))
        .route("/update", put(handlers::session::update))
        .route("/status", get(handlers::session::status))
        .route(
            "/listCurrentSessions",
            get(handlers::session::list_current),
        )
}

/// Banner and health
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root::index))
        .route("/health", get(handlers::health::health))
}
