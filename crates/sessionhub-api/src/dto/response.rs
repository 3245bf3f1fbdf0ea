//! Response DTOs.

use serde::{Deserialize, Serialize};

/// `GET /` banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    /// Service description.
    pub message: String,
    /// Crate version.
    pub version: String,
}

/// A message plus a single session payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEnvelope<T> {
    /// Human-readable outcome.
    pub message: String,
    /// The session, either a stored record or a view with inactivity.
    pub session: T,
}

impl<T> SessionEnvelope<T> {
    /// Wrap a session payload.
    pub fn new(message: impl Into<String>, session: T) -> Self {
        Self {
            message: message.into(),
            session,
        }
    }
}

/// `GET /listCurrentSessions` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionListResponse<T> {
    /// Human-readable outcome.
    pub message: String,
    /// Number of sessions returned.
    pub count: usize,
    /// The sessions.
    pub sessions: Vec<T>,
}

/// `GET /health` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` when the store is unreachable.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Session store backend name.
    pub store: String,
}
