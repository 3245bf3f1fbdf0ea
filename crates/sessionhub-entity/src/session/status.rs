//! Session lifecycle status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use sessionhub_core::AppError;

/// Lifecycle status of a tracked session.
///
/// Statuses are ordered `Active < Inactive < Ended < RemovedBySystemFailure`.
/// A record may only move forward along that order, with one exception:
/// `Inactive` and `Ended` sessions can be reactivated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "session_status", rename_all = "snake_case")]
pub enum SessionStatus {
    /// The client is currently using the session.
    Active,
    /// The session is idle but has not been closed.
    Inactive,
    /// The client logged out.
    Ended,
    /// Reserved for out-of-band failure reconciliation. Terminal.
    RemovedBySystemFailure,
}

impl SessionStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [SessionStatus; 4] = [
        Self::Active,
        Self::Inactive,
        Self::Ended,
        Self::RemovedBySystemFailure,
    ];

    fn rank(self) -> u8 {
        match self {
            Self::Active => 0,
            Self::Inactive => 1,
            Self::Ended => 2,
            Self::RemovedBySystemFailure => 3,
        }
    }

    /// Whether a record in this status may move to `next`.
    pub fn can_transition_to(self, next: SessionStatus) -> bool {
        if self == Self::RemovedBySystemFailure {
            return next == Self::RemovedBySystemFailure;
        }
        next.rank() >= self.rank() || next == Self::Active
    }

    /// Return an error when the move to `next` is not allowed.
    pub fn ensure_transition(self, next: SessionStatus) -> Result<(), AppError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(AppError::conflict(format!(
                "Session status cannot change from {self} to {next}"
            )))
        }
    }

    /// Return the status as a snake_case string (the stored form).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Ended => "ended",
            Self::RemovedBySystemFailure => "removed_by_system_failure",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "ended" => Ok(Self::Ended),
            "removedbysystemfailure" => Ok(Self::RemovedBySystemFailure),
            _ => Err(AppError::validation(format!(
                "Invalid session status: '{s}'. Expected one of: active, inactive, ended, removed_by_system_failure"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SessionStatus::*;

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(Active.can_transition_to(Inactive));
        assert!(Active.can_transition_to(Ended));
        assert!(Inactive.can_transition_to(Ended));
        assert!(Ended.can_transition_to(Ended));
        assert!(Ended.can_transition_to(RemovedBySystemFailure));
    }

    #[test]
    fn test_reactivation_allowed() {
        assert!(Inactive.can_transition_to(Active));
        assert!(Ended.can_transition_to(Active));
    }

    #[test]
    fn test_backward_transitions_rejected() {
        assert!(!Ended.can_transition_to(Inactive));
        assert!(!RemovedBySystemFailure.can_transition_to(Active));
        assert!(!RemovedBySystemFailure.can_transition_to(Ended));
        let err = RemovedBySystemFailure.ensure_transition(Active).unwrap_err();
        assert_eq!(err.kind, sessionhub_core::error::ErrorKind::Conflict);
    }

    #[test]
    fn test_from_str_accepts_variants() {
        assert_eq!("active".parse::<SessionStatus>().unwrap(), Active);
        assert_eq!("Ended".parse::<SessionStatus>().unwrap(), Ended);
        assert_eq!(
            "removed_by_system_failure".parse::<SessionStatus>().unwrap(),
            RemovedBySystemFailure
        );
        assert_eq!(
            "RemovedBySystemFailure".parse::<SessionStatus>().unwrap(),
            RemovedBySystemFailure
        );
        assert!("finished".parse::<SessionStatus>().is_err());
    }

    #[test]
    fn test_serializes_as_variant_name() {
        assert_eq!(serde_json::to_string(&Inactive).unwrap(), "\"Inactive\"");
    }
}
