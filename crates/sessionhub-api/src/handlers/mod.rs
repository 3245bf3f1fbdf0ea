//! Route handlers organized by domain.

pub mod health;
pub mod root;
pub mod session;
