//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
///
/// Reports `"degraded"` when the session store does not answer.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = if state.session_repo.ping().await {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: state.session_repo.backend().to_string(),
    })
}
