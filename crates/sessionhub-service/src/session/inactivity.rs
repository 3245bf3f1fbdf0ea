//! Inactivity computation.

use chrono::{DateTime, FixedOffset};
use tracing::warn;

use sessionhub_core::time::LocalClock;
use sessionhub_entity::session::InactivityDuration;

/// Time elapsed between `last_accessed` and `now`.
///
/// An unparsable timestamp yields zero with a warning rather than an error,
/// so one corrupt record cannot fail a status or listing call.
pub fn inactivity_at(
    clock: &LocalClock,
    last_accessed: &str,
    now: DateTime<FixedOffset>,
) -> InactivityDuration {
    match clock.parse(last_accessed) {
        Ok(then) => InactivityDuration::from_elapsed(now.signed_duration_since(then)),
        Err(e) => {
            warn!(last_accessed, error = %e, "Could not compute inactivity; reporting zero");
            InactivityDuration::zero()
        }
    }
}
