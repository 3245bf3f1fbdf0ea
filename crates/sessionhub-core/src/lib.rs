//! # sessionhub-core
//!
//! Core crate for SessionHub. Contains the repository trait, configuration
//! schemas, typed identifiers, the local-time clock used for every stored
//! timestamp, and the unified error system.
//!
//! This crate has **no** internal dependencies on other SessionHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod time;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
