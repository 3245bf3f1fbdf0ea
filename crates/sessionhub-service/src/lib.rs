//! # sessionhub-service
//!
//! Business logic for SessionHub. The [`SessionManager`] drives the session
//! lifecycle (login, update, logout, status, listing) on top of a
//! [`sessionhub_database::SessionRepository`] and encrypts client hardware
//! addresses through a shared [`sessionhub_cipher::CipherContext`].
//!
//! Dependencies are injected at construction time via `Arc` references.

pub mod session;

pub use session::{NewSession, SessionManager, inactivity_at};
