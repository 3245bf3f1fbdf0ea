//! Read-only session view with computed inactivity.

use serde::{Deserialize, Serialize};

use super::inactivity::InactivityDuration;
use super::model::SessionRecord;

/// A stored record paired with its inactivity at the time of the query.
///
/// Building a view never writes to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    /// The unmodified stored record.
    #[serde(flatten)]
    pub session: SessionRecord,
    /// Time since `lastAccessed`.
    pub inactivity_time: InactivityDuration,
}

impl SessionView {
    /// Pair a record with its inactivity.
    pub fn new(session: SessionRecord, inactivity_time: InactivityDuration) -> Self {
        Self {
            session,
            inactivity_time,
        }
    }
}
