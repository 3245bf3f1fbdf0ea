//! Session repository trait and its implementations.

pub mod memory;
pub mod session;

use async_trait::async_trait;

use sessionhub_core::result::AppResult;
use sessionhub_core::traits::Repository;
use sessionhub_core::types::SessionId;
use sessionhub_entity::session::{SessionRecord, SessionStatus};

pub use memory::MemorySessionRepository;
pub use session::PgSessionRepository;

/// Persistence seam for session records.
///
/// `update` writes only the mutable fields (`clientInfo.ip`, `serverInfo`,
/// `status`, `lastAccessed`, `updatedAt`); identity fields, the encrypted
/// hardware address and `createdAt` keep their stored values. Concurrent
/// updates of one record are last-write-wins.
#[async_trait]
pub trait SessionRepository: Repository<SessionRecord, SessionId> + std::fmt::Debug {
    /// All records currently in `status`, in no particular order.
    async fn find_by_status(&self, status: SessionStatus) -> AppResult<Vec<SessionRecord>>;

    /// Number of records per status, one entry for each status in
    /// [`SessionStatus::ALL`] order, zero included.
    async fn count_by_status(&self) -> AppResult<Vec<(SessionStatus, u64)>>;

    /// Name of the backend, for health reporting.
    fn backend(&self) -> &'static str;

    /// Whether the backend is reachable.
    async fn ping(&self) -> bool {
        true
    }
}

/// Spread grouped counts over every status, filling absent ones with zero.
fn counts_for_all_statuses(
    grouped: impl IntoIterator<Item = (SessionStatus, u64)>,
) -> Vec<(SessionStatus, u64)> {
    let mut counts: Vec<(SessionStatus, u64)> =
        SessionStatus::ALL.iter().map(|&status| (status, 0)).collect();
    for (status, n) in grouped {
        if let Some(slot) = counts.iter_mut().find(|(s, _)| *s == status) {
            slot.1 += n;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_fill_missing_statuses() {
        let counts = counts_for_all_statuses([(SessionStatus::Ended, 3), (SessionStatus::Active, 2)]);
        assert_eq!(
            counts,
            vec![
                (SessionStatus::Active, 2),
                (SessionStatus::Inactive, 0),
                (SessionStatus::Ended, 3),
                (SessionStatus::RemovedBySystemFailure, 0),
            ]
        );
    }
}
