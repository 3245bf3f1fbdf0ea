//! Inactivity duration value object.

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Time elapsed since a session was last accessed.
///
/// `hours` wraps at 24, matching the display the service has always
/// produced; whole days are not reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InactivityDuration {
    /// Whole hours, modulo 24.
    pub hours: i64,
    /// Whole minutes (0–59).
    pub minutes: i64,
    /// Whole seconds (0–59).
    pub seconds: i64,
    /// `"{h}h {m}m {s}s"`.
    pub formatted: String,
}

impl InactivityDuration {
    /// Build from hour/minute/second components.
    pub fn new(hours: i64, minutes: i64, seconds: i64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            formatted: format!("{hours}h {minutes}m {seconds}s"),
        }
    }

    /// The `0h 0m 0s` value used when the duration cannot be computed.
    pub fn zero() -> Self {
        Self::new(0, 0, 0)
    }

    /// Decompose an elapsed duration. Negative durations clamp to zero.
    pub fn from_elapsed(elapsed: Duration) -> Self {
        let total = elapsed.num_seconds().max(0);
        Self::new((total / 3600) % 24, (total / 60) % 60, total % 60)
    }

    /// Whether every component is zero.
    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

impl Default for InactivityDuration {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for InactivityDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decomposes_components() {
        let d = InactivityDuration::from_elapsed(Duration::seconds(3600 + 2 * 60 + 3));
        assert_eq!(d, InactivityDuration::new(1, 2, 3));
        assert_eq!(d.formatted, "1h 2m 3s");
    }

    #[test]
    fn test_hours_wrap_at_a_day() {
        let d = InactivityDuration::from_elapsed(Duration::hours(25) + Duration::seconds(5));
        assert_eq!((d.hours, d.minutes, d.seconds), (1, 0, 5));
    }

    #[test]
    fn test_negative_clamps_to_zero() {
        let d = InactivityDuration::from_elapsed(Duration::seconds(-90));
        assert!(d.is_zero());
        assert_eq!(d.to_string(), "0h 0m 0s");
    }

    #[test]
    fn test_sub_second_truncates() {
        let d = InactivityDuration::from_elapsed(Duration::milliseconds(59_999));
        assert_eq!((d.minutes, d.seconds), (0, 59));
    }
}
