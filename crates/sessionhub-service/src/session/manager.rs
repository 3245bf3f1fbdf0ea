//! Session lifecycle manager.

use std::sync::Arc;

use tracing::{error, info, warn};

use sessionhub_cipher::CipherContext;
use sessionhub_core::error::AppError;
use sessionhub_core::time::LocalClock;
use sessionhub_core::types::SessionId;
use sessionhub_database::SessionRepository;
use sessionhub_entity::session::{NetworkInfo, SessionRecord, SessionStatus, SessionView};

use super::inactivity::inactivity_at;

/// Client-supplied login fields.
///
/// Fields are optional so that absence is reported as a validation error
/// naming the field rather than as a deserialization failure.
#[derive(Debug, Clone, Default)]
pub struct NewSession {
    /// Client email.
    pub email: Option<String>,
    /// Client nickname.
    pub nickname: Option<String>,
    /// Plain client hardware address. Encrypted before it is stored.
    pub mac_address: Option<String>,
}

fn required(value: Option<&str>, field: &str) -> Result<String, AppError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::missing_field(field))
}

fn log_failure(operation: &str, session_id: Option<SessionId>, err: &AppError) {
    let session_id = session_id.map(|id| id.to_string()).unwrap_or_default();
    if err.is_client_error() {
        warn!(
            operation,
            session_id = %session_id,
            kind = %err.kind,
            message = %err.message,
            "Session operation rejected"
        );
    } else {
        error!(
            operation,
            session_id = %session_id,
            kind = %err.kind,
            error = %err,
            "Session operation failed"
        );
    }
}

/// Drives the session lifecycle against a repository.
#[derive(Debug, Clone)]
pub struct SessionManager {
    repo: Arc<dyn SessionRepository>,
    cipher: Arc<CipherContext>,
    clock: LocalClock,
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        repo: Arc<dyn SessionRepository>,
        cipher: Arc<CipherContext>,
        clock: LocalClock,
    ) -> Self {
        Self {
            repo,
            cipher,
            clock,
        }
    }

    /// The clock used for every timestamp this manager writes.
    pub fn clock(&self) -> &LocalClock {
        &self.clock
    }

    /// The cipher protecting stored hardware addresses.
    pub fn cipher(&self) -> &CipherContext {
        &self.cipher
    }

    /// Open a new `Active` session.
    pub async fn create(
        &self,
        input: NewSession,
        client_ip: &str,
        server_info: NetworkInfo,
    ) -> Result<SessionRecord, AppError> {
        let result = self.try_create(input, client_ip, server_info).await;
        match &result {
            Ok(record) => info!(
                session_id = %record.session_id,
                email = %record.email,
                client_ip = %record.client_info.ip,
                "Session created"
            ),
            Err(e) => log_failure("create", None, e),
        }
        result
    }

    async fn try_create(
        &self,
        input: NewSession,
        client_ip: &str,
        server_info: NetworkInfo,
    ) -> Result<SessionRecord, AppError> {
        let email = required(input.email.as_deref(), "email")?;
        let nickname = required(input.nickname.as_deref(), "nickname")?;
        let mac_address = required(input.mac_address.as_deref(), "macAddress")?;

        let token = self.cipher.encrypt(&mac_address)?;
        let record = SessionRecord::new(
            email,
            nickname,
            client_ip,
            token,
            server_info,
            &self.clock.now_stamp(),
        );

        self.repo.create(&record).await
    }

    /// Close a session.
    pub async fn logout(&self, session_id: SessionId) -> Result<SessionRecord, AppError> {
        let result = self.try_logout(session_id).await;
        match &result {
            Ok(record) => info!(
                session_id = %session_id,
                status = %record.status,
                "Session ended"
            ),
            Err(e) => log_failure("logout", Some(session_id), e),
        }
        result
    }

    async fn try_logout(&self, session_id: SessionId) -> Result<SessionRecord, AppError> {
        let mut record = self.load(session_id).await?;
        record.end(&self.clock.now_stamp())?;
        self.repo.update(&record).await
    }

    /// Refresh network identity and reactivate a session.
    pub async fn update(
        &self,
        session_id: SessionId,
        client_ip: &str,
        server_info: NetworkInfo,
    ) -> Result<SessionRecord, AppError> {
        let result = self.try_update(session_id, client_ip, server_info).await;
        match &result {
            Ok(record) => info!(
                session_id = %session_id,
                status = %record.status,
                client_ip = %record.client_info.ip,
                "Session updated"
            ),
            Err(e) => log_failure("update", Some(session_id), e),
        }
        result
    }

    async fn try_update(
        &self,
        session_id: SessionId,
        client_ip: &str,
        server_info: NetworkInfo,
    ) -> Result<SessionRecord, AppError> {
        let mut record = self.load(session_id).await?;
        record.reactivate(client_ip, server_info, &self.clock.now_stamp())?;
        self.repo.update(&record).await
    }

    /// Look up a session and compute its inactivity. Never writes.
    ///
    /// `session_id` is the raw client value; missing or malformed input is a
    /// validation error.
    pub async fn get_status(&self, session_id: Option<&str>) -> Result<SessionView, AppError> {
        let id = SessionId::parse_required(session_id).inspect_err(|e| {
            log_failure("status", None, e);
        })?;

        let record = self
            .load(id)
            .await
            .inspect_err(|e| log_failure("status", Some(id), e))?;

        let inactivity = inactivity_at(&self.clock, &record.last_accessed, self.clock.now());
        info!(
            session_id = %id,
            status = %record.status,
            inactivity = %inactivity,
            "Session status retrieved"
        );
        Ok(SessionView::new(record, inactivity))
    }

    /// Every `Active` session with its inactivity. Never writes.
    pub async fn list_active(&self) -> Result<Vec<SessionView>, AppError> {
        let records = self
            .repo
            .find_by_status(SessionStatus::Active)
            .await
            .inspect_err(|e| log_failure("list_active", None, e))?;

        let now = self.clock.now();
        let views: Vec<SessionView> = records
            .into_iter()
            .map(|record| {
                let inactivity = inactivity_at(&self.clock, &record.last_accessed, now);
                SessionView::new(record, inactivity)
            })
            .collect();

        info!(count = views.len(), "Listed active sessions");
        Ok(views)
    }

    async fn load(&self, session_id: SessionId) -> Result<SessionRecord, AppError> {
        self.repo
            .find_by_id(&session_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Session {session_id} not found")))
    }
}
