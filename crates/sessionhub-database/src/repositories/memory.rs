//! In-process session repository.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use sessionhub_core::error::AppError;
use sessionhub_core::result::AppResult;
use sessionhub_core::traits::Repository;
use sessionhub_core::types::SessionId;
use sessionhub_entity::session::{SessionRecord, SessionStatus};

use super::{SessionRepository, counts_for_all_statuses};

/// Session repository held in a concurrent map.
///
/// Same semantics as the PostgreSQL store; contents are lost when the
/// process exits. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionRepository {
    records: Arc<DashMap<SessionId, SessionRecord>>,
}

impl MemorySessionRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<SessionRecord, SessionId> for MemorySessionRepository {
    async fn find_by_id(&self, id: &SessionId) -> AppResult<Option<SessionRecord>> {
        Ok(self.records.get(id).map(|r| r.value().clone()))
    }

    async fn create(&self, record: &SessionRecord) -> AppResult<SessionRecord> {
        match self.records.entry(record.session_id) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Session {} already exists",
                record.session_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                debug!(session_id = %record.session_id, "Stored session in memory");
                Ok(record.clone())
            }
        }
    }

    async fn update(&self, record: &SessionRecord) -> AppResult<SessionRecord> {
        let mut stored = self
            .records
            .get_mut(&record.session_id)
            .ok_or_else(|| AppError::not_found(format!("Session {} not found", record.session_id)))?;

        stored.client_info.ip = record.client_info.ip.clone();
        stored.server_info = record.server_info.clone();
        stored.status = record.status;
        stored.last_accessed = record.last_accessed.clone();
        stored.updated_at = record.updated_at.clone();

        Ok(stored.value().clone())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.records.len() as u64)
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn find_by_status(&self, status: SessionStatus) -> AppResult<Vec<SessionRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|entry| entry.status == status)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn count_by_status(&self) -> AppResult<Vec<(SessionStatus, u64)>> {
        Ok(counts_for_all_statuses(
            self.records.iter().map(|entry| (entry.status, 1)),
        ))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
