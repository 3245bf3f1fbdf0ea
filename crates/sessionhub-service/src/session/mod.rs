//! Session lifecycle services.

pub mod inactivity;
pub mod manager;

pub use inactivity::inactivity_at;
pub use manager::{NewSession, SessionManager};
