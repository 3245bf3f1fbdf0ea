//! Local-time clock for session timestamps.
//!
//! Every timestamp SessionHub persists is a `DD-MM-YYYY HH:MM:SS` string in
//! one configured UTC offset. Arithmetic happens on parsed
//! [`DateTime<FixedOffset>`] values; strings exist only at the record
//! boundary.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};

use crate::config::SessionConfig;
use crate::error::AppError;

/// The single format used for every stored timestamp.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Clock bound to the serving region's UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalClock {
    offset: FixedOffset,
}

impl LocalClock {
    /// Create a clock for the given offset.
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Create a clock from session configuration.
    pub fn from_config(config: &SessionConfig) -> Result<Self, AppError> {
        Ok(Self::new(config.offset()?))
    }

    /// The configured offset.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// The current instant in the local zone.
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }

    /// The current instant formatted for storage.
    pub fn now_stamp(&self) -> String {
        self.format(&self.now())
    }

    /// Format an instant for storage, converting it into the local zone first.
    pub fn format<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> String {
        instant
            .with_timezone(&self.offset)
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }

    /// Parse a stored timestamp as local time.
    pub fn parse(&self, stamp: &str) -> Result<DateTime<FixedOffset>, AppError> {
        let naive = NaiveDateTime::parse_from_str(stamp.trim(), TIMESTAMP_FORMAT).map_err(|e| {
            AppError::validation(format!("Invalid timestamp '{stamp}': {e}"))
        })?;

        self.offset
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| AppError::validation(format!("Ambiguous timestamp '{stamp}'")))
    }
}

impl Default for LocalClock {
    /// UTC clock, for tests and tools that do not load configuration.
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}
