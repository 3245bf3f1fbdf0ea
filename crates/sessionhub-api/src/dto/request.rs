//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use sessionhub_service::NewSession;

/// `POST /login` body.
///
/// Fields are optional here; presence is checked by the session manager so
/// the error names the missing field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Client email.
    #[validate(length(max = 254, message = "email is too long"))]
    pub email: Option<String>,
    /// Client nickname.
    #[validate(length(max = 100, message = "nickname is too long"))]
    pub nickname: Option<String>,
    /// Plain hardware address.
    #[validate(length(max = 64, message = "macAddress is too long"))]
    pub mac_address: Option<String>,
}

impl From<LoginRequest> for NewSession {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            nickname: req.nickname,
            mac_address: req.mac_address,
        }
    }
}

/// Body of `POST /logout` and `PUT /update`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdRequest {
    /// Raw session identifier.
    #[validate(length(max = 64, message = "sessionId is too long"))]
    pub session_id: Option<String>,
}

/// Query string of `GET /status`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusQuery {
    /// Raw session identifier.
    pub session_id: Option<String>,
}
