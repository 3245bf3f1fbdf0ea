//! Core traits defined in `sessionhub-core` and implemented by other crates.

pub mod repository;

pub use repository::Repository;
