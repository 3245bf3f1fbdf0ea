//! # sessionhub-database
//!
//! Session store implementations. [`repositories::SessionRepository`] is the
//! seam the service layer depends on; PostgreSQL and in-memory
//! implementations sit behind it.

pub mod connection;
pub mod repositories;

pub use connection::{DatabasePool, mask_password};
pub use repositories::{MemorySessionRepository, PgSessionRepository, SessionRepository};
