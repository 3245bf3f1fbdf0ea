//! Session handlers: login, logout, update, status, listing.

use axum::Json;
use axum::extract::{Query, State};

use sessionhub_core::types::SessionId;
use sessionhub_entity::session::{SessionRecord, SessionView};

use crate::dto::request::{LoginRequest, SessionIdRequest, StatusQuery};
use crate::dto::response::{SessionEnvelope, SessionListResponse};
use crate::error::ApiError;
use crate::extractors::{ClientIp, ValidatedJson};
use crate::state::AppState;

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    client_ip: ClientIp,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<SessionEnvelope<SessionRecord>>, ApiError> {
    let session = state
        .session_manager
        .create(
            req.into(),
            client_ip.as_str(),
            state.server_identity.info().clone(),
        )
        .await?;

    Ok(Json(SessionEnvelope::new("Logged in successfully", session)))
}

/// POST /logout
pub async fn logout(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SessionIdRequest>,
) -> Result<Json<SessionEnvelope<SessionRecord>>, ApiError> {
    let session_id = SessionId::parse_required(req.session_id.as_deref())?;
    let session = state.session_manager.logout(session_id).await?;

    Ok(Json(SessionEnvelope::new("Logout successful", session)))
}

/// PUT /update
pub async fn update(
    State(state): State<AppState>,
    client_ip: ClientIp,
    ValidatedJson(req): ValidatedJson<SessionIdRequest>,
) -> Result<Json<SessionEnvelope<SessionRecord>>, ApiError> {
    let session_id = SessionId::parse_required(req.session_id.as_deref())?;
    let session = state
        .session_manager
        .update(
            session_id,
            client_ip.as_str(),
            state.server_identity.info().clone(),
        )
        .await?;

    Ok(Json(SessionEnvelope::new("Session updated", session)))
}

/// GET /status?sessionId=...
pub async fn status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<SessionEnvelope<SessionView>>, ApiError> {
    let view = state
        .session_manager
        .get_status(query.session_id.as_deref())
        .await?;

    Ok(Json(SessionEnvelope::new("Session found", view)))
}

/// GET /listCurrentSessions
pub async fn list_current(
    State(state): State<AppState>,
) -> Result<Json<SessionListResponse<SessionView>>, ApiError> {
    let sessions = state.session_manager.list_active().await?;
    let message = if sessions.is_empty() {
        "No active sessions"
    } else {
        "Active sessions found"
    };

    Ok(Json(SessionListResponse {
        message: message.to_string(),
        count: sessions.len(),
        sessions,
    }))
}
