//! PostgreSQL session repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use sessionhub_core::error::{AppError, ErrorKind};
use sessionhub_core::result::AppResult;
use sessionhub_core::traits::Repository;
use sessionhub_core::types::SessionId;
use sessionhub_entity::session::{NetworkInfo, SessionRecord, SessionStatus};

use super::{SessionRepository, counts_for_all_statuses};

const SELECT_COLUMNS: &str = "session_id, email, nickname, client_ip, client_mac, server_ip, \
     server_mac, status, last_accessed, created_at, updated_at";

/// Flat row shape of the `sessions` table.
#[derive(Debug, FromRow)]
struct SessionRow {
    session_id: SessionId,
    email: String,
    nickname: String,
    client_ip: String,
    client_mac: String,
    server_ip: String,
    server_mac: String,
    status: SessionStatus,
    last_accessed: String,
    created_at: String,
    updated_at: String,
}

impl From<SessionRow> for SessionRecord {
    fn from(row: SessionRow) -> Self {
        Self {
            session_id: row.session_id,
            email: row.email,
            nickname: row.nickname,
            client_info: NetworkInfo::new(row.client_ip, row.client_mac),
            server_info: NetworkInfo::new(row.server_ip, row.server_mac),
            status: row.status,
            last_accessed: row.last_accessed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Session repository backed by the `sessions` table.
#[derive(Debug, Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<SessionRecord, SessionId> for PgSessionRepository {
    async fn find_by_id(&self, id: &SessionId) -> AppResult<Option<SessionRecord>> {
        let row = sqlx::query_as::<_, SessionRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM sessions WHERE session_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find session", e))?;

        Ok(row.map(SessionRecord::from))
    }

    async fn create(&self, record: &SessionRecord) -> AppResult<SessionRecord> {
        let row = sqlx::query_as::<_, SessionRow>(&format!(
            "INSERT INTO sessions (session_id, email, nickname, client_ip, client_mac, server_ip, \
             server_mac, status, last_accessed, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING {SELECT_COLUMNS}"
        ))
        .bind(record.session_id)
        .bind(&record.email)
        .bind(&record.nickname)
        .bind(&record.client_info.ip)
        .bind(&record.client_info.mac)
        .bind(&record.server_info.ip)
        .bind(&record.server_info.mac)
        .bind(record.status)
        .bind(&record.last_accessed)
        .bind(&record.created_at)
        .bind(&record.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if duplicate {
                AppError::conflict(format!("Session {} already exists", record.session_id))
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create session", e)
            }
        })?;

        Ok(row.into())
    }

    async fn update(&self, record: &SessionRecord) -> AppResult<SessionRecord> {
        let row = sqlx::query_as::<_, SessionRow>(&format!(
            "UPDATE sessions SET client_ip = $2, server_ip = $3, server_mac = $4, status = $5, \
             last_accessed = $6, updated_at = $7 WHERE session_id = $1 RETURNING {SELECT_COLUMNS}"
        ))
        .bind(record.session_id)
        .bind(&record.client_info.ip)
        .bind(&record.server_info.ip)
        .bind(&record.server_info.mac)
        .bind(record.status)
        .bind(&record.last_accessed)
        .bind(&record.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update session", e))?;

        row.map(SessionRecord::from)
            .ok_or_else(|| AppError::not_found(format!("Session {} not found", record.session_id)))
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count sessions", e)
            })?;
        Ok(count.max(0) as u64)
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn find_by_status(&self, status: SessionStatus) -> AppResult<Vec<SessionRecord>> {
        let rows = sqlx::query_as::<_, SessionRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM sessions WHERE status = $1"
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list sessions by status", e)
        })?;

        Ok(rows.into_iter().map(SessionRecord::from).collect())
    }

    async fn count_by_status(&self) -> AppResult<Vec<(SessionStatus, u64)>> {
        let rows: Vec<(SessionStatus, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM sessions GROUP BY status")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        "Failed to count sessions by status",
                        e,
                    )
                })?;

        Ok(counts_for_all_statuses(
            rows.into_iter().map(|(status, n)| (status, n.max(0) as u64)),
        ))
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .unwrap_or(false)
    }
}
