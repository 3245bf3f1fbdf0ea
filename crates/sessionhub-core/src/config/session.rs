//! Session timestamp configuration.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Session timestamp configuration.
///
/// Every stored timestamp is written in the single local zone configured
/// here; there is no per-record zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// UTC offset of the serving region, formatted `"+HH:MM"` or `"-HH:MM"`.
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            utc_offset: default_utc_offset(),
        }
    }
}

impl SessionConfig {
    /// Parse the configured offset.
    pub fn offset(&self) -> Result<FixedOffset, AppError> {
        parse_utc_offset(&self.utc_offset)
    }
}

/// Parse an offset of the form `+HH:MM`, `-HH:MM`, or `Z`.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset, AppError> {
    let invalid = || {
        AppError::configuration(format!(
            "Invalid session.utc_offset '{raw}'. Expected '+HH:MM' or '-HH:MM'"
        ))
    };

    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match raw.as_bytes().first() {
        Some(b'+') => (1, &raw[1..]),
        Some(b'-') => (-1, &raw[1..]),
        _ => return Err(invalid()),
    };

    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 14 || minutes > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

/// America/Mexico_City; the region has not observed DST since 2022.
fn default_utc_offset() -> String {
    "-06:00".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_negative_offset() {
        let offset = parse_utc_offset("-06:00").expect("valid offset");
        assert_eq!(offset.local_minus_utc(), -6 * 3600);
    }

    #[test]
    fn test_parse_positive_offset_with_minutes() {
        let offset = parse_utc_offset("+05:30").expect("valid offset");
        assert_eq!(offset.local_minus_utc(), 5 * 3600 + 30 * 60);
    }

    #[test]
    fn test_parse_utc() {
        assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_utc_offset("+00:00").unwrap().local_minus_utc(), 0);
    }

    #[test]
    fn test_reject_malformed_offsets() {
        for raw in ["", "06:00", "-6:00", "+15:00", "-06:60", "America/Mexico_City"] {
            assert!(parse_utc_offset(raw).is_err(), "accepted {raw:?}");
        }
    }
}
