//! Session record entity model.

use serde::{Deserialize, Serialize};

use sessionhub_core::AppError;
use sessionhub_core::types::SessionId;

use super::network::NetworkInfo;
use super::status::SessionStatus;

/// A tracked client session.
///
/// Records are created on login and mutated on update and logout; they are
/// never deleted. Timestamps are local-time strings produced by
/// [`sessionhub_core::time::LocalClock`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Unique session identifier.
    pub session_id: SessionId,
    /// Client-supplied email.
    pub email: String,
    /// Client-supplied nickname.
    pub nickname: String,
    /// Client IP and encrypted hardware-address token.
    pub client_info: NetworkInfo,
    /// Serving host identity at the time of the last write.
    pub server_info: NetworkInfo,
    /// Lifecycle status.
    pub status: SessionStatus,
    /// Last client-facing interaction.
    pub last_accessed: String,
    /// Creation time. Never changes.
    pub created_at: String,
    /// Last persisted mutation.
    pub updated_at: String,
}

impl SessionRecord {
    /// Build a new `Active` record stamped with `now` for every timestamp.
    ///
    /// `encrypted_mac` must already be the cipher token.
    pub fn new(
        email: impl Into<String>,
        nickname: impl Into<String>,
        client_ip: impl Into<String>,
        encrypted_mac: impl Into<String>,
        server_info: NetworkInfo,
        now: &str,
    ) -> Self {
        Self {
            session_id: SessionId::new(),
            email: email.into(),
            nickname: nickname.into(),
            client_info: NetworkInfo::new(client_ip, encrypted_mac),
            server_info,
            status: SessionStatus::Active,
            last_accessed: now.to_string(),
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }

    /// Whether the session is currently active.
    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    /// Close the session on logout.
    pub fn end(&mut self, now: &str) -> Result<(), AppError> {
        self.status.ensure_transition(SessionStatus::Ended)?;
        self.status = SessionStatus::Ended;
        self.touch(now);
        Ok(())
    }

    /// Refresh network identity and force the session back to `Active`.
    pub fn reactivate(
        &mut self,
        client_ip: impl Into<String>,
        server_info: NetworkInfo,
        now: &str,
    ) -> Result<(), AppError> {
        self.status.ensure_transition(SessionStatus::Active)?;
        self.status = SessionStatus::Active;
        self.client_info.ip = client_ip.into();
        self.server_info = server_info;
        self.touch(now);
        Ok(())
    }

    fn touch(&mut self, now: &str) {
        self.last_accessed = now.to_string();
        self.updated_at = now.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: &str = "01-02-2024 10:00:00";
    const T1: &str = "01-02-2024 10:05:00";

    fn record() -> SessionRecord {
        SessionRecord::new(
            "ana@example.com",
            "ana",
            "10.0.0.7",
            "b64token==",
            NetworkInfo::new("10.0.0.1", "AA:BB:CC:DD:EE:FF"),
            T0,
        )
    }

    #[test]
    fn test_new_record_is_active_with_equal_stamps() {
        let r = record();
        assert!(r.is_active());
        assert_eq!(r.created_at, T0);
        assert_eq!(r.updated_at, T0);
        assert_eq!(r.last_accessed, T0);
        assert_eq!(r.client_info.mac, "b64token==");
    }

    #[test]
    fn test_end_keeps_identity() {
        let mut r = record();
        let id = r.session_id;
        r.end(T1).unwrap();
        assert_eq!(r.status, SessionStatus::Ended);
        assert_eq!(r.session_id, id);
        assert_eq!(r.created_at, T0);
        assert_eq!(r.last_accessed, T1);
        assert_eq!(r.updated_at, T1);
    }

    #[test]
    fn test_reactivate_refreshes_network() {
        let mut r = record();
        r.end(T0).unwrap();
        r.reactivate("10.0.0.9", NetworkInfo::new("10.0.0.2", "11:22:33:44:55:66"), T1)
            .unwrap();
        assert!(r.is_active());
        assert_eq!(r.client_info.ip, "10.0.0.9");
        assert_eq!(r.client_info.mac, "b64token==");
        assert_eq!(r.server_info.ip, "10.0.0.2");
    }

    #[test]
    fn test_removed_record_is_frozen() {
        let mut r = record();
        r.status = SessionStatus::RemovedBySystemFailure;
        assert!(r.end(T1).is_err());
        assert!(r.reactivate("1.1.1.1", NetworkInfo::default(), T1).is_err());
        assert_eq!(r.updated_at, T0);
    }

    #[test]
    fn test_serializes_with_camel_case_fields() {
        let json = serde_json::to_value(record()).unwrap();
        assert!(json.get("sessionId").is_some());
        assert!(json.get("lastAccessed").is_some());
        assert_eq!(json["clientInfo"]["ip"], "10.0.0.7");
        assert_eq!(json["status"], "Active");
    }
}
