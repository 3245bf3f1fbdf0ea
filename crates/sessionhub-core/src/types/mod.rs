//! Core type definitions used across the SessionHub workspace.

pub mod id;

pub use id::*;
